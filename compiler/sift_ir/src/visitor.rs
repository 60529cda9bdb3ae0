//! Syntax tree visitor.
//!
//! A single `Visitor` trait is provided for traversal. The visitor can mutate
//! its own state during traversal, but the tree remains immutable.
//!
//! Default implementations call `walk_*` functions that traverse children.
//! Override `visit_*` methods to add behavior at specific nodes, and call the
//! matching `walk_*` function to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast ExprArena) {
//!         if matches!(expr.kind, ExprKind::Call { .. }) {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr, arena);
//!     }
//! }
//! ```

use crate::ast::{
    CaseClause, CommClause, Decl, Expr, ExprArena, ExprId, ExprKind, Stmt, StmtId, StmtKind,
    SyntaxTree, ValueSpec,
};
use crate::stack::ensure_sufficient_stack;

// Visitor Trait

/// Syntax tree visitor trait.
pub trait Visitor<'ast> {
    /// Visit a top-level declaration.
    fn visit_decl(&mut self, decl: &'ast Decl, arena: &'ast ExprArena) {
        walk_decl(self, decl, arena);
    }

    /// Visit a statement.
    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        walk_stmt(self, stmt, arena);
    }

    /// Visit a statement by ID.
    fn visit_stmt_id(&mut self, id: StmtId, arena: &'ast ExprArena) {
        ensure_sufficient_stack(|| self.visit_stmt(arena.stmt(id), arena));
    }

    /// Visit an expression.
    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast ExprArena) {
        walk_expr(self, expr, arena);
    }

    /// Visit an expression by ID.
    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast ExprArena) {
        ensure_sufficient_stack(|| self.visit_expr(arena.expr(id), arena));
    }
}

// Walk Functions
//
// All walk functions traverse children in depth-first, left-to-right order,
// matching source order.

/// Walk every declaration of a tree.
pub fn walk_tree<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, tree: &'ast SyntaxTree) {
    for decl in &tree.decls {
        visitor.visit_decl(decl, &tree.arena);
    }
}

/// Walk a declaration's children.
pub fn walk_decl<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    decl: &'ast Decl,
    arena: &'ast ExprArena,
) {
    match decl {
        Decl::Func { body, .. } => {
            if let Some(body) = body {
                walk_stmt_list(visitor, body, arena);
            }
        }
        Decl::Var(specs) => walk_value_specs(visitor, specs, arena),
    }
}

fn walk_stmt_list<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    stmts: &'ast [StmtId],
    arena: &'ast ExprArena,
) {
    for &id in stmts {
        visitor.visit_stmt_id(id, arena);
    }
}

fn walk_expr_list<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    exprs: &'ast [ExprId],
    arena: &'ast ExprArena,
) {
    for &id in exprs {
        visitor.visit_expr_id(id, arena);
    }
}

fn walk_value_specs<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    specs: &'ast [ValueSpec],
    arena: &'ast ExprArena,
) {
    for spec in specs {
        walk_expr_list(visitor, &spec.names, arena);
        walk_expr_list(visitor, &spec.values, arena);
    }
}

fn walk_case_clauses<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    clauses: &'ast [CaseClause],
    arena: &'ast ExprArena,
) {
    for clause in clauses {
        walk_expr_list(visitor, &clause.list, arena);
        walk_stmt_list(visitor, &clause.body, arena);
    }
}

fn walk_comm_clauses<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    clauses: &'ast [CommClause],
    arena: &'ast ExprArena,
) {
    for clause in clauses {
        if let Some(comm) = clause.comm {
            visitor.visit_stmt_id(comm, arena);
        }
        walk_stmt_list(visitor, &clause.body, arena);
    }
}

/// Walk a statement's children.
pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    stmt: &'ast Stmt,
    arena: &'ast ExprArena,
) {
    match &stmt.kind {
        StmtKind::Branch | StmtKind::Empty => {}

        StmtKind::Expr(expr) | StmtKind::Go(expr) | StmtKind::Defer(expr) | StmtKind::IncDec(expr) => {
            visitor.visit_expr_id(*expr, arena);
        }
        StmtKind::Assign { lhs, rhs, .. } => {
            walk_expr_list(visitor, lhs, arena);
            walk_expr_list(visitor, rhs, arena);
        }
        StmtKind::Decl(specs) => walk_value_specs(visitor, specs, arena),
        StmtKind::Block(body) => walk_stmt_list(visitor, body, arena),
        StmtKind::Labeled(inner) => visitor.visit_stmt_id(*inner, arena),

        StmtKind::If {
            init,
            cond,
            then,
            els,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            visitor.visit_expr_id(*cond, arena);
            visitor.visit_stmt_id(*then, arena);
            if let Some(els) = els {
                visitor.visit_stmt_id(*els, arena);
            }
        }
        StmtKind::For {
            init,
            cond,
            post,
            body,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            if let Some(cond) = cond {
                visitor.visit_expr_id(*cond, arena);
            }
            if let Some(post) = post {
                visitor.visit_stmt_id(*post, arena);
            }
            visitor.visit_stmt_id(*body, arena);
        }
        StmtKind::Range {
            key,
            value,
            expr,
            body,
        } => {
            if let Some(key) = key {
                visitor.visit_expr_id(*key, arena);
            }
            if let Some(value) = value {
                visitor.visit_expr_id(*value, arena);
            }
            visitor.visit_expr_id(*expr, arena);
            visitor.visit_stmt_id(*body, arena);
        }
        StmtKind::Switch { init, tag, clauses } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            if let Some(tag) = tag {
                visitor.visit_expr_id(*tag, arena);
            }
            walk_case_clauses(visitor, clauses, arena);
        }
        StmtKind::TypeSwitch {
            init,
            guard,
            clauses,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            visitor.visit_stmt_id(*guard, arena);
            walk_case_clauses(visitor, clauses, arena);
        }
        StmtKind::Select(clauses) => walk_comm_clauses(visitor, clauses, arena),
        StmtKind::Return(results) => walk_expr_list(visitor, results, arena),
        StmtKind::Send { chan, value } => {
            visitor.visit_expr_id(*chan, arena);
            visitor.visit_expr_id(*value, arena);
        }
    }
}

/// Walk an expression's children.
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast ExprArena,
) {
    match &expr.kind {
        // Leaves
        ExprKind::Ident { .. } | ExprKind::BasicLit | ExprKind::Type | ExprKind::Bad => {}

        // Single child
        ExprKind::Paren(inner) | ExprKind::Star(inner) | ExprKind::Unary(inner) => {
            visitor.visit_expr_id(*inner, arena);
        }
        ExprKind::Selector { base, .. } | ExprKind::TypeAssert { base, .. } => {
            visitor.visit_expr_id(*base, arena);
        }

        // Two children
        ExprKind::KeyValue { key, value } => {
            visitor.visit_expr_id(*key, arena);
            visitor.visit_expr_id(*value, arena);
        }
        ExprKind::Binary { left, right } => {
            visitor.visit_expr_id(*left, arena);
            visitor.visit_expr_id(*right, arena);
        }

        // Lists
        ExprKind::Composite { elements } => walk_expr_list(visitor, elements, arena),
        ExprKind::Index { base, indices } => {
            visitor.visit_expr_id(*base, arena);
            walk_expr_list(visitor, indices, arena);
        }
        ExprKind::Slice { base, bounds } => {
            visitor.visit_expr_id(*base, arena);
            walk_expr_list(visitor, bounds, arena);
        }
        ExprKind::Call { func, args, .. } => {
            visitor.visit_expr_id(*func, arena);
            walk_expr_list(visitor, args, arena);
        }

        // Function literals carry statements
        ExprKind::FuncLit { body } => walk_stmt_list(visitor, body, arena),
    }
}
