//! errsift IR - typed program representation
//!
//! This crate contains the data the checker consumes, as produced by an
//! external front end:
//! - Spans and source files with line/column translation
//! - The type pool (`TypeId` handles into one session-owned `TypePool`)
//! - Arena-allocated syntax trees with closed node kinds
//! - A visitor with default depth-first walks
//! - Program units (one per package and build configuration)
//!
//! Everything here is immutable once loading finishes and is shared across
//! checker threads by reference.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
pub mod builder;
mod program;
mod source;
mod span;
pub mod stack;
mod types;
mod validate;
pub mod visitor;

pub use ast::{
    AssignOp, CaseClause, CommClause, Decl, Expr, ExprArena, ExprId, ExprKind, FuncRef,
    Selection, SelectionKind, Stmt, StmtId, StmtKind, Symbol, SyntaxTree, ValueSpec,
};
pub use program::{Program, ProgramUnit, SourceUnit};
pub use source::{LineCol, SourceFile};
pub use span::{Span, SpanError};
pub use types::{
    BasicKind, Field, InterfaceType, Method, MethodId, TypeData, TypeId, TypePool,
    FAILURE_TYPE_NAME,
};
pub use validate::TreeError;
