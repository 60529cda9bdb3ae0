//! Statement visitor.
//!
//! Walks every statement of a file, nested function literals included, and
//! reports failure values that are neither bound to a name nor checked.
//!
//! | Statement                    | Reported when                                 |
//! |------------------------------|-----------------------------------------------|
//! | `f()`, `go f()`, `defer f()` | any result is a failure value                 |
//! | `a, _ := f()`                | `BLANK` and the `_` slot is a failure value   |
//! | `_, b = f(), g()`            | `BLANK` and the paired call returns failure   |
//! | `s := x.(T)`                 | `ASSERTS`                                     |
//! | `s, _ := x.(T)`              | `ASSERTS` and `BLANK`                         |
//!
//! Excluded callees are never reported. Type switch guards (`x.(type)`) are
//! never reported. Expressions the front end could not resolve are treated as
//! not returning a failure value; the walk continues past them.

use tracing::trace;

use sift_diagnostic::{Diagnostic, DiagnosticKind};
use sift_ir::visitor::{walk_stmt, walk_tree, Visitor};
use sift_ir::{ExprArena, ExprId, ExprKind, SourceUnit, Stmt, StmtKind, TypePool};
use sift_types::classify_call;

use crate::callee::{resolve_callee, Callee};
use crate::config::CheckConfig;
use crate::exclusions::ExclusionIndex;

/// Check one file and return its diagnostics in visit order.
pub fn check_file(
    pool: &TypePool,
    index: &ExclusionIndex,
    config: &CheckConfig,
    file: &SourceUnit,
) -> Vec<Diagnostic> {
    let mut visitor = StatementVisitor {
        pool,
        index,
        config,
        file,
        diagnostics: Vec::new(),
    };
    walk_tree(&mut visitor, &file.tree);
    visitor.diagnostics
}

/// A call target looked up against the exclusion rules.
enum Target {
    Excluded,
    /// Unresolved calls (`None`) are never excluded.
    Reportable(Option<Callee>),
}

struct StatementVisitor<'a> {
    pool: &'a TypePool,
    index: &'a ExclusionIndex,
    config: &'a CheckConfig,
    file: &'a SourceUnit,
    diagnostics: Vec<Diagnostic>,
}

impl<'ast> Visitor<'ast> for StatementVisitor<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Go(expr) | StmtKind::Defer(expr) => {
                self.check_call_stmt(*expr, arena);
            }
            StmtKind::Assign { lhs, rhs, .. } => {
                if let [value] = rhs.as_slice() {
                    self.check_single_value(lhs, *value, arena);
                } else {
                    self.check_parallel_assign(lhs, rhs, arena);
                }
            }
            _ => {}
        }
        walk_stmt(self, stmt, arena);
    }
}

impl StatementVisitor<'_> {
    /// `f()`, `go f()`, `defer f()`.
    fn check_call_stmt(&mut self, call: ExprId, arena: &ExprArena) {
        let ExprKind::Call { lparen, .. } = arena.expr(call).kind else {
            return;
        };
        if !classify_call(self.pool, arena, call).returns_failure() {
            return;
        }
        let Target::Reportable(callee) = self.target(arena, call) else {
            return;
        };
        self.report(lparen, DiagnosticKind::UncheckedCall, arena, call, callee.as_ref());
    }

    /// `lhs... = value` with a single value on the right.
    fn check_single_value(&mut self, lhs: &[ExprId], value: ExprId, arena: &ExprArena) {
        let expr = arena.expr(value);
        match &expr.kind {
            ExprKind::Call { .. } => {
                if !self.config.blank() {
                    return;
                }
                let classification = classify_call(self.pool, arena, value);
                if !classification.returns_failure() {
                    return;
                }
                let Target::Reportable(callee) = self.target(arena, value) else {
                    return;
                };
                for (slot, &target) in lhs.iter().enumerate() {
                    let target_expr = arena.expr(target);
                    if target_expr.is_blank() && classification.slot_is_failure(slot) {
                        self.report(
                            target_expr.pos(),
                            DiagnosticKind::UncheckedBlank,
                            arena,
                            value,
                            callee.as_ref(),
                        );
                    }
                }
            }
            ExprKind::TypeAssert {
                asserted: Some(_), ..
            } => {
                if !self.config.asserts() {
                    return;
                }
                match lhs {
                    [_] | [] => self.report_assertion(expr.pos()),
                    [_, ok, ..] => {
                        let ok = arena.expr(*ok);
                        if self.config.blank() && ok.is_blank() {
                            self.report_assertion(ok.pos());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// `a, b = x, y`: each target paired with its own value.
    ///
    /// An assertion paired with one target cannot use the `ok` form, yet it
    /// is only reported when its target is `_` and both `BLANK` and
    /// `ASSERTS` are set. An assertion bound to a name is not reported.
    fn check_parallel_assign(&mut self, lhs: &[ExprId], rhs: &[ExprId], arena: &ExprArena) {
        if !self.config.blank() {
            return;
        }
        for (&target, &value) in lhs.iter().zip(rhs) {
            let target_expr = arena.expr(target);
            if !target_expr.is_blank() {
                continue;
            }
            match &arena.expr(value).kind {
                ExprKind::Call { .. } => {
                    if !classify_call(self.pool, arena, value).slot_is_failure(0) {
                        continue;
                    }
                    let Target::Reportable(callee) = self.target(arena, value) else {
                        continue;
                    };
                    self.report(
                        target_expr.pos(),
                        DiagnosticKind::UncheckedBlank,
                        arena,
                        value,
                        callee.as_ref(),
                    );
                }
                ExprKind::TypeAssert {
                    asserted: Some(_), ..
                } if self.config.asserts() => {
                    self.report_assertion(target_expr.pos());
                }
                _ => {}
            }
        }
    }

    fn target(&self, arena: &ExprArena, call: ExprId) -> Target {
        let callee = resolve_callee(self.pool, arena, call);
        if let Some(callee) = &callee {
            if let Some(reason) = self.index.exclusion_reason(callee) {
                trace!(callee = callee.full_name(), ?reason, "excluded");
                return Target::Excluded;
            }
        }
        Target::Reportable(callee)
    }

    fn report(
        &mut self,
        offset: u32,
        kind: DiagnosticKind,
        arena: &ExprArena,
        call: ExprId,
        callee: Option<&Callee>,
    ) {
        let mut diagnostic = Diagnostic::at(&self.file.source, offset, kind);
        if let Some(selector) = selector_name(arena, call) {
            diagnostic = diagnostic.with_selector(selector);
        }
        if let Some(callee) = callee {
            diagnostic = diagnostic.with_callee(callee.full_name());
        }
        self.diagnostics.push(diagnostic);
    }

    fn report_assertion(&mut self, offset: u32) {
        self.diagnostics.push(Diagnostic::at(
            &self.file.source,
            offset,
            DiagnosticKind::UncheckedAssertion,
        ));
    }
}

/// `Close` in `f.Close()`.
fn selector_name(arena: &ExprArena, call: ExprId) -> Option<&str> {
    let ExprKind::Call { func, .. } = &arena.expr(call).kind else {
        return None;
    };
    match &arena.expr(*func).kind {
        ExprKind::Selector { name, .. } => Some(name.as_str()),
        _ => None,
    }
}
