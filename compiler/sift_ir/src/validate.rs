//! Structural validation of syntax trees from untrusted sources.
//!
//! A tree read from a dump must reference only nodes that exist, and every
//! node must be reachable from exactly one parent. The second rule makes the
//! tree acyclic, which is what guarantees that visiting terminates.

use std::fmt;

use crate::ast::{Decl, ExprKind, StmtKind, SyntaxTree};
use crate::{ExprArena, ExprId, StmtId};

/// Why a syntax tree was rejected.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TreeError {
    /// Reference to an expression that is not in the arena.
    DanglingExpr(ExprId),
    /// Reference to a statement that is not in the arena.
    DanglingStmt(StmtId),
    /// Expression reachable from more than one parent.
    SharedExpr(ExprId),
    /// Statement reachable from more than one parent.
    SharedStmt(StmtId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DanglingExpr(id) => write!(f, "reference to missing expression {id:?}"),
            TreeError::DanglingStmt(id) => write!(f, "reference to missing statement {id:?}"),
            TreeError::SharedExpr(id) => write!(f, "expression {id:?} has more than one parent"),
            TreeError::SharedStmt(id) => write!(f, "statement {id:?} has more than one parent"),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Copy, Clone)]
enum Node {
    Expr(ExprId),
    Stmt(StmtId),
}

impl SyntaxTree {
    /// Check that every reference resolves and the node graph is a tree.
    pub fn validate(&self) -> Result<(), TreeError> {
        let arena = &self.arena;
        let mut seen_exprs = vec![false; arena.expr_count()];
        let mut seen_stmts = vec![false; arena.stmt_count()];
        let mut frontier: Vec<Node> = Vec::new();

        for decl in &self.decls {
            match decl {
                Decl::Func { body, .. } => {
                    if let Some(body) = body {
                        frontier.extend(body.iter().copied().map(Node::Stmt));
                    }
                }
                Decl::Var(specs) => {
                    for spec in specs {
                        frontier.extend(spec.names.iter().copied().map(Node::Expr));
                        frontier.extend(spec.values.iter().copied().map(Node::Expr));
                    }
                }
            }
        }

        while let Some(node) = frontier.pop() {
            match node {
                Node::Expr(id) => {
                    let seen = seen_exprs
                        .get_mut(id.index())
                        .ok_or(TreeError::DanglingExpr(id))?;
                    if *seen {
                        return Err(TreeError::SharedExpr(id));
                    }
                    *seen = true;
                    push_expr_children(arena, id, &mut frontier);
                }
                Node::Stmt(id) => {
                    let seen = seen_stmts
                        .get_mut(id.index())
                        .ok_or(TreeError::DanglingStmt(id))?;
                    if *seen {
                        return Err(TreeError::SharedStmt(id));
                    }
                    *seen = true;
                    push_stmt_children(arena, id, &mut frontier);
                }
            }
        }
        Ok(())
    }
}

fn push_exprs(frontier: &mut Vec<Node>, ids: &[ExprId]) {
    frontier.extend(ids.iter().copied().map(Node::Expr));
}

fn push_stmts(frontier: &mut Vec<Node>, ids: &[StmtId]) {
    frontier.extend(ids.iter().copied().map(Node::Stmt));
}

fn push_expr_children(arena: &ExprArena, id: ExprId, frontier: &mut Vec<Node>) {
    match &arena.expr(id).kind {
        ExprKind::Ident { .. } | ExprKind::BasicLit | ExprKind::Type | ExprKind::Bad => {}
        ExprKind::Paren(inner) | ExprKind::Star(inner) | ExprKind::Unary(inner) => {
            frontier.push(Node::Expr(*inner));
        }
        ExprKind::Selector { base, .. } | ExprKind::TypeAssert { base, .. } => {
            frontier.push(Node::Expr(*base));
        }
        ExprKind::KeyValue { key: a, value: b } | ExprKind::Binary { left: a, right: b } => {
            push_exprs(frontier, &[*a, *b]);
        }
        ExprKind::Composite { elements } => push_exprs(frontier, elements),
        ExprKind::Index { base, indices: rest } | ExprKind::Slice { base, bounds: rest } => {
            frontier.push(Node::Expr(*base));
            push_exprs(frontier, rest);
        }
        ExprKind::Call { func, args, .. } => {
            frontier.push(Node::Expr(*func));
            push_exprs(frontier, args);
        }
        ExprKind::FuncLit { body } => push_stmts(frontier, body),
    }
}

fn push_stmt_children(arena: &ExprArena, id: StmtId, frontier: &mut Vec<Node>) {
    match &arena.stmt(id).kind {
        StmtKind::Branch | StmtKind::Empty => {}
        StmtKind::Expr(e) | StmtKind::Go(e) | StmtKind::Defer(e) | StmtKind::IncDec(e) => {
            frontier.push(Node::Expr(*e));
        }
        StmtKind::Assign { lhs, rhs, .. } => {
            push_exprs(frontier, lhs);
            push_exprs(frontier, rhs);
        }
        StmtKind::Decl(specs) => {
            for spec in specs {
                push_exprs(frontier, &spec.names);
                push_exprs(frontier, &spec.values);
            }
        }
        StmtKind::Block(body) => push_stmts(frontier, body),
        StmtKind::Labeled(inner) => frontier.push(Node::Stmt(*inner)),
        StmtKind::If {
            init,
            cond,
            then,
            els,
        } => {
            frontier.extend(init.map(Node::Stmt));
            frontier.push(Node::Expr(*cond));
            frontier.push(Node::Stmt(*then));
            frontier.extend(els.map(Node::Stmt));
        }
        StmtKind::For {
            init,
            cond,
            post,
            body,
        } => {
            frontier.extend(init.map(Node::Stmt));
            frontier.extend(cond.map(Node::Expr));
            frontier.extend(post.map(Node::Stmt));
            frontier.push(Node::Stmt(*body));
        }
        StmtKind::Range {
            key,
            value,
            expr,
            body,
        } => {
            frontier.extend(key.map(Node::Expr));
            frontier.extend(value.map(Node::Expr));
            frontier.push(Node::Expr(*expr));
            frontier.push(Node::Stmt(*body));
        }
        StmtKind::Switch { init, tag, clauses } => {
            frontier.extend(init.map(Node::Stmt));
            frontier.extend(tag.map(Node::Expr));
            for clause in clauses {
                push_exprs(frontier, &clause.list);
                push_stmts(frontier, &clause.body);
            }
        }
        StmtKind::TypeSwitch {
            init,
            guard,
            clauses,
        } => {
            frontier.extend(init.map(Node::Stmt));
            frontier.push(Node::Stmt(*guard));
            for clause in clauses {
                push_exprs(frontier, &clause.list);
                push_stmts(frontier, &clause.body);
            }
        }
        StmtKind::Select(clauses) => {
            for clause in clauses {
                frontier.extend(clause.comm.map(Node::Stmt));
                push_stmts(frontier, &clause.body);
            }
        }
        StmtKind::Return(results) => push_exprs(frontier, results),
        StmtKind::Send { chan, value } => push_exprs(frontier, &[*chan, *value]),
    }
}
