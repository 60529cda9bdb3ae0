//! Callee naming.
//!
//! Exclusion rules refer to callees by qualified name, in the same form the
//! type formatter prints receiver types:
//!
//! ```text
//! os.Remove(path)        -> os.Remove
//! buf.WriteString(s)     -> (*bytes.Buffer).WriteString
//! w.Close() where w: W   -> (p.W).Close, (io.Closer).Close
//! ```
//!
//! A method reached through embedded interfaces gets one candidate name per
//! link of its selection chain.

use smallvec::{smallvec, SmallVec};

use sift_ir::{ExprArena, ExprId, ExprKind, FuncRef, MethodId, Symbol, TypePool};
use sift_types::{selection_chain, type_string};

/// Sentinel first arguments that narrow rules by value instead of by type.
const SENTINEL_PACKAGE: &str = "os";
const SENTINEL_VARS: &[&str] = &["Stdout", "Stderr"];

/// A resolved call target, named every way an exclusion rule can name it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Callee {
    name: String,
    package: Option<String>,
    full_name: String,
    candidates: SmallVec<[String; 2]>,
    first_arg: Option<String>,
}

impl Callee {
    pub fn new(name: impl Into<String>, package: Option<&str>, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Callee {
            name: name.into(),
            package: package.map(str::to_string),
            candidates: smallvec![full_name.clone()],
            full_name,
            first_arg: None,
        }
    }

    #[must_use]
    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = String>) -> Self {
        self.candidates = candidates.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_first_arg(mut self, arg: impl Into<String>) -> Self {
        self.first_arg = Some(arg.into());
        self
    }

    /// Bare name: `Remove`, `WriteString`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaring package path.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Declared qualified name: `os.Remove`, `(*bytes.Buffer).WriteString`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Every qualified name an exact-symbol rule may use for this call.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Name of the first argument for narrowed rules: `os.Stdout`,
    /// `os.Stderr`, or the argument's type string.
    pub fn first_arg(&self) -> Option<&str> {
        self.first_arg.as_deref()
    }
}

/// Resolve the target of the call expression `call`.
///
/// Returns `None` for anything but a call of a declared function or method
/// (function values, built-ins, conversions, calls the front end could not
/// resolve).
pub fn resolve_callee(pool: &TypePool, arena: &ExprArena, call: ExprId) -> Option<Callee> {
    let ExprKind::Call { func, args, .. } = &arena.expr(call).kind else {
        return None;
    };

    let (func_ref, selection) = match &arena.expr(strip_parens(arena, *func)).kind {
        ExprKind::Ident {
            symbol: Some(Symbol::Func(func_ref)),
            ..
        } => (func_ref, None),
        ExprKind::Selector {
            symbol: Some(Symbol::Func(func_ref)),
            selection,
            ..
        } => (func_ref, selection.as_ref()),
        _ => return None,
    };

    let full_name = qualified_name(pool, func_ref);
    let mut callee = Callee::new(&func_ref.name, func_ref.package.as_deref(), full_name);

    let method = MethodId::new(&func_ref.name, func_ref.package.as_deref());
    if let Some(chain) = selection.and_then(|sel| selection_chain(pool, sel, method)) {
        callee = callee.with_candidates(
            chain
                .types()
                .iter()
                .map(|&ty| format!("({}).{}", type_string(pool, ty), func_ref.name)),
        );
    }

    if let Some(arg) = args.first().and_then(|&arg| argument_name(pool, arena, arg)) {
        callee = callee.with_first_arg(arg);
    }
    Some(callee)
}

/// `pkg/path.Name` for functions, `(Recv).Name` for methods.
pub fn qualified_name(pool: &TypePool, func_ref: &FuncRef) -> String {
    match (func_ref.receiver, &func_ref.package) {
        (Some(recv), _) => format!("({}).{}", type_string(pool, recv), func_ref.name),
        (None, Some(package)) => format!("{package}.{}", func_ref.name),
        (None, None) => func_ref.name.clone(),
    }
}

fn argument_name(pool: &TypePool, arena: &ExprArena, arg: ExprId) -> Option<String> {
    let expr = arena.expr(arg);
    if let ExprKind::Selector {
        symbol:
            Some(Symbol::Var {
                package: Some(package),
                name,
            }),
        ..
    } = &expr.kind
    {
        if package == SENTINEL_PACKAGE && SENTINEL_VARS.contains(&name.as_str()) {
            return Some(format!("{package}.{name}"));
        }
    }
    if expr.ty.is_invalid() {
        return None;
    }
    Some(type_string(pool, expr.ty))
}

fn strip_parens(arena: &ExprArena, mut id: ExprId) -> ExprId {
    while let ExprKind::Paren(inner) = &arena.expr(id).kind {
        id = *inner;
    }
    id
}
