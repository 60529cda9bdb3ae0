//! Typed syntax tree.
//!
//! Nodes are stored flat in an [`ExprArena`] and referenced by [`ExprId`] /
//! [`StmtId`]. Node kinds are closed enums: the checker's behavior is a fixed
//! switch over a small set of statement shapes, so there is no open-ended
//! dispatch.
//!
//! Every expression carries the static type the front end computed for it
//! (`TypeId::INVALID` when none was recorded). For a call expression that is
//! the call's result type: a single type, or a tuple for multiple results.

use std::fmt;

use crate::{Span, TypeId};

/// Index of an expression in an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ExprId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index of a statement in an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        StmtId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Resolved identity of a function or method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct FuncRef {
    /// Declaring package path (`None` only for predeclared functions).
    pub package: Option<String>,
    pub name: String,
    /// Receiver type of a method as declared (`*bytes.Buffer`, `io.Writer`, ...).
    /// `None` for free functions.
    pub receiver: Option<TypeId>,
}

/// What an identifier resolves to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    /// A declared function or method.
    Func(FuncRef),
    /// A predeclared function such as `recover` or `len`.
    Builtin(String),
    /// A variable, including package-level ones such as `os.Stdout`.
    Var {
        package: Option<String>,
        name: String,
    },
    /// An imported package name.
    Package(String),
    TypeName(TypeId),
    Const,
    Nil,
}

/// How a selector expression `x.f` was resolved.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionKind {
    FieldVal,
    MethodVal,
    MethodExpr,
}

/// Selection information for `x.f` where `x` is a value (not a package).
///
/// `index` is the path through embedded fields: every entry but the last
/// selects an embedded struct field; the last selects the member itself.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub kind: SelectionKind,
    /// Static type of `x`.
    pub recv: TypeId,
    pub index: Vec<u32>,
    pub indirect: bool,
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: TypeId,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, ty: TypeId) -> Self {
        Expr { kind, span, ty }
    }

    /// Position of the expression: the start of its span.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.span.start
    }

    /// Is this the blank identifier `_`?
    pub fn is_blank(&self) -> bool {
        matches!(&self.kind, ExprKind::Ident { name, .. } if name == "_")
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    Ident {
        name: String,
        symbol: Option<Symbol>,
    },
    BasicLit,
    FuncLit {
        body: Vec<StmtId>,
    },
    Composite {
        elements: Vec<ExprId>,
    },
    KeyValue {
        key: ExprId,
        value: ExprId,
    },
    Paren(ExprId),
    /// `base.name`. For a qualified identifier (`fmt.Println`) `selection` is
    /// `None` and `symbol` names the package member.
    Selector {
        base: ExprId,
        name: String,
        name_span: Span,
        symbol: Option<Symbol>,
        selection: Option<Selection>,
    },
    Index {
        base: ExprId,
        indices: Vec<ExprId>,
    },
    Slice {
        base: ExprId,
        bounds: Vec<ExprId>,
    },
    /// `base.(T)`; `asserted` is `None` for a type switch guard `base.(type)`.
    TypeAssert {
        base: ExprId,
        asserted: Option<TypeId>,
    },
    /// `func(args)`; `lparen` is the byte offset of the opening parenthesis.
    Call {
        func: ExprId,
        args: Vec<ExprId>,
        lparen: u32,
    },
    Star(ExprId),
    Unary(ExprId),
    Binary {
        left: ExprId,
        right: ExprId,
    },
    /// A type used in expression position (conversion target, composite type).
    Type,
    /// Expression the front end could not make sense of.
    Bad,
}

/// Assignment operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// `+=`, `|=`, ...
    Compound,
}

/// `var a, b = x, y`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueSpec {
    pub names: Vec<ExprId>,
    pub values: Vec<ExprId>,
}

/// `case list: body` in an expression or type switch.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseClause {
    pub list: Vec<ExprId>,
    pub body: Vec<StmtId>,
}

/// `case comm: body` in a select statement; `comm` is `None` for `default`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct CommClause {
    pub comm: Option<StmtId>,
    pub body: Vec<StmtId>,
}

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Expression evaluated for its side effects.
    Expr(ExprId),
    /// `go call`
    Go(ExprId),
    /// `defer call`
    Defer(ExprId),
    Assign {
        lhs: Vec<ExprId>,
        rhs: Vec<ExprId>,
        op: AssignOp,
    },
    /// Local `var` declaration.
    Decl(Vec<ValueSpec>),
    Block(Vec<StmtId>),
    If {
        init: Option<StmtId>,
        cond: ExprId,
        then: StmtId,
        els: Option<StmtId>,
    },
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
        body: StmtId,
    },
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        expr: ExprId,
        body: StmtId,
    },
    Switch {
        init: Option<StmtId>,
        tag: Option<ExprId>,
        clauses: Vec<CaseClause>,
    },
    /// `switch x := y.(type)`; `guard` is the assignment or expression
    /// statement holding the `.(type)` assertion.
    TypeSwitch {
        init: Option<StmtId>,
        guard: StmtId,
        clauses: Vec<CaseClause>,
    },
    Select(Vec<CommClause>),
    Return(Vec<ExprId>),
    Send {
        chan: ExprId,
        value: ExprId,
    },
    IncDec(ExprId),
    Labeled(StmtId),
    /// `break`, `continue`, `goto`, `fallthrough`
    Branch,
    Empty,
}

/// Top-level declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    /// Function or method; `body` is `None` for external declarations.
    Func {
        name: String,
        body: Option<Vec<StmtId>>,
    },
    Var(Vec<ValueSpec>),
}

/// Flat storage for the expressions and statements of one syntax tree.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId(u32::try_from(self.stmts.len()).unwrap_or(u32::MAX));
        self.stmts.push(stmt);
        id
    }

    /// Get an expression.
    ///
    /// # Panics
    /// Panics on an id from another arena. Trees from untrusted sources must pass
    /// [`SyntaxTree::validate`] first.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get a statement. Same contract as [`Self::expr`].
    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

/// One file's typed syntax tree.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxTree {
    pub decls: Vec<Decl>,
    pub arena: ExprArena,
}
