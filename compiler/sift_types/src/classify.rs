//! Call classification.
//!
//! Decides, per result position of a call, whether the value there is of the
//! predeclared `error` type. The built-in `recover` is treated as producing a
//! failure value in every position regardless of its static type.

use smallvec::SmallVec;

use sift_ir::{ExprArena, ExprId, ExprKind, Symbol, TypeData, TypeId, TypePool};

/// Per-slot failure flags of one call's results.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ResultClassification {
    slots: SmallVec<[bool; 4]>,
    recover: bool,
}

impl ResultClassification {
    /// Classify a result type: a tuple per element, anything else as one slot.
    pub fn of_type(pool: &TypePool, ty: TypeId) -> Self {
        let slots = match pool.get(ty) {
            TypeData::Tuple(elems) => elems.iter().map(|&t| pool.is_failure_type(t)).collect(),
            _ => SmallVec::from_elem(pool.is_failure_type(ty), 1),
        };
        ResultClassification {
            slots,
            recover: false,
        }
    }

    /// Failure flag per result position.
    pub fn slots(&self) -> &[bool] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// A call with no results.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The callee is the built-in `recover`.
    pub fn is_recover(&self) -> bool {
        self.recover
    }

    /// Some result carries a failure value.
    pub fn returns_failure(&self) -> bool {
        self.recover || self.slots.iter().any(|&failure| failure)
    }

    /// Result `index` carries a failure value. Out-of-range slots never do.
    pub fn slot_is_failure(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|&failure| failure || self.recover)
    }
}

/// Classify the call expression `call`.
///
/// Anything that is not a call classifies as having no results.
pub fn classify_call(pool: &TypePool, arena: &ExprArena, call: ExprId) -> ResultClassification {
    let expr = arena.expr(call);
    if !matches!(expr.kind, ExprKind::Call { .. }) {
        return ResultClassification::default();
    }
    let mut classification = ResultClassification::of_type(pool, expr.ty);
    classification.recover = is_recover(arena, call);
    classification
}

/// Is `call` a call of the built-in `recover`?
pub fn is_recover(arena: &ExprArena, call: ExprId) -> bool {
    let ExprKind::Call { func, .. } = &arena.expr(call).kind else {
        return false;
    };
    let mut callee = *func;
    while let ExprKind::Paren(inner) = &arena.expr(callee).kind {
        callee = *inner;
    }
    matches!(
        &arena.expr(callee).kind,
        ExprKind::Ident { symbol: Some(Symbol::Builtin(name)), .. } if name == "recover"
    )
}
