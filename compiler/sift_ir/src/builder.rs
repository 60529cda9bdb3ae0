//! Programmatic construction of typed syntax trees.
//!
//! Front ends that produce trees in-process, and tests, build a file by
//! supplying its source text and allocating nodes whose spans point into it.
//! [`TreeBuilder::find`] locates spans by searching the text.

use crate::ast::{Decl, Expr, ExprArena, ExprId, ExprKind, Stmt, StmtId, StmtKind};
use crate::{SourceFile, SourceUnit, Span, SyntaxTree, TypeId};

pub struct TreeBuilder {
    path: String,
    text: String,
    arena: ExprArena,
    decls: Vec<Decl>,
}

impl TreeBuilder {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        TreeBuilder {
            path: path.into(),
            text: text.into(),
            arena: ExprArena::new(),
            decls: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Span of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<Span> {
        self.find_nth(needle, 0)
    }

    /// Span of the `nth` (0-based) occurrence of `needle`.
    pub fn find_nth(&self, needle: &str, nth: usize) -> Option<Span> {
        let (start, _) = self.text.match_indices(needle).nth(nth)?;
        Span::try_from_range(start..start + needle.len()).ok()
    }

    pub fn expr(&mut self, kind: ExprKind, span: Span, ty: TypeId) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span, ty))
    }

    pub fn stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }

    /// Look at an already allocated expression.
    pub fn get(&self, id: ExprId) -> &Expr {
        self.arena.expr(id)
    }

    pub fn func(&mut self, name: impl Into<String>, body: Vec<StmtId>) {
        self.decls.push(Decl::Func {
            name: name.into(),
            body: Some(body),
        });
    }

    pub fn finish(self) -> SourceUnit {
        SourceUnit::new(
            SourceFile::new(self.path, self.text),
            SyntaxTree {
                decls: self.decls,
                arena: self.arena,
            },
        )
    }
}
