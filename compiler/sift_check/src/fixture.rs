//! Typed programs for tests.
//!
//! A fixture holds the source text of one file, `a/main.go` in package `a`,
//! plus a type pool. Tests allocate nodes whose spans are found by searching
//! the text, push statements into the body of `main`, and check the result.

use sift_diagnostic::Report;
use sift_ir::builder::TreeBuilder;
use sift_ir::{
    ExprId, ExprKind, Field, FuncRef, Method, Program, ProgramUnit, Selection, SelectionKind,
    Span, StmtId, StmtKind, Symbol, TypeId, TypePool,
};

use crate::{CheckConfig, Checker};

pub(crate) const PACKAGE: &str = "a";

pub(crate) struct Fixture {
    pub(crate) pool: TypePool,
    builder: TreeBuilder,
    body: Vec<StmtId>,
}

impl Fixture {
    pub(crate) fn new(text: &str) -> Self {
        Self::with_path("a/main.go", text)
    }

    pub(crate) fn with_path(path: &str, text: &str) -> Self {
        Fixture {
            pool: TypePool::new(),
            builder: TreeBuilder::new(path, text),
            body: Vec::new(),
        }
    }

    // Spans

    pub(crate) fn span(&self, needle: &str) -> Span {
        self.span_nth(needle, 0)
    }

    pub(crate) fn span_nth(&self, needle: &str, nth: usize) -> Span {
        self.builder
            .find_nth(needle, nth)
            .unwrap_or_else(|| panic!("{needle:?} (#{nth}) not in fixture source"))
    }

    /// Span of `inner` inside the first occurrence of `outer`.
    pub(crate) fn span_within(&self, outer: &str, inner: &str) -> Span {
        let outer_span = self.span(outer);
        let offset = outer
            .find(inner)
            .unwrap_or_else(|| panic!("{inner:?} not in {outer:?}"));
        let start = outer_span.start + u32::try_from(offset).unwrap();
        Span::new(start, start + u32::try_from(inner.len()).unwrap())
    }

    // Types

    /// A defined struct type and a pointer to it.
    pub(crate) fn struct_type(&mut self, package: &str, name: &str) -> (TypeId, TypeId) {
        let named = self.pool.named(Some(package), name);
        let underlying = self.pool.structure(Vec::new());
        self.pool.set_underlying(named, underlying);
        (named, self.pool.pointer(named))
    }

    /// A defined interface type whose methods all return `error`.
    pub(crate) fn interface_type(
        &mut self,
        package: &str,
        name: &str,
        methods: &[&str],
        embeddeds: Vec<TypeId>,
    ) -> TypeId {
        let signature = self.pool.signature(Vec::new(), vec![TypeId::ERROR]);
        let methods = methods
            .iter()
            .map(|m| Method {
                name: (*m).to_string(),
                package: Some(package.to_string()),
                signature,
            })
            .collect();
        let named = self.pool.named(Some(package), name);
        let underlying = self.pool.interface(methods, embeddeds);
        self.pool.set_underlying(named, underlying);
        named
    }

    /// A defined struct type embedding `field` as its only field.
    pub(crate) fn embedding_struct(&mut self, name: &str, field: TypeId) -> TypeId {
        let named = self.pool.named(Some(PACKAGE), name);
        let underlying = self.pool.structure(vec![Field {
            name: "embedded".to_string(),
            ty: field,
            embedded: true,
        }]);
        self.pool.set_underlying(named, underlying);
        named
    }

    pub(crate) fn results(&mut self, results: &[TypeId]) -> TypeId {
        self.pool.tuple(results.to_vec())
    }

    // Expressions

    pub(crate) fn expr(&mut self, kind: ExprKind, span: Span, ty: TypeId) -> ExprId {
        self.builder.expr(kind, span, ty)
    }

    pub(crate) fn ident(&mut self, span: Span, symbol: Option<Symbol>, ty: TypeId) -> ExprId {
        let name = self.builder.text()[span.start as usize..span.end as usize].to_string();
        self.expr(ExprKind::Ident { name, symbol }, span, ty)
    }

    /// A local variable (or `_`) at `span`.
    pub(crate) fn local(&mut self, span: Span, ty: TypeId) -> ExprId {
        let name = self.builder.text()[span.start as usize..span.end as usize].to_string();
        let symbol = (name != "_").then(|| Symbol::Var {
            package: None,
            name: name.clone(),
        });
        self.expr(ExprKind::Ident { name, symbol }, span, ty)
    }

    /// The `nth` blank identifier.
    pub(crate) fn blank(&mut self, nth: usize) -> ExprId {
        let span = self.span_nth("_", nth);
        self.local(span, TypeId::INVALID)
    }

    /// A function of package `a` named by the text at `span`.
    pub(crate) fn func(&mut self, span: Span) -> ExprId {
        let name = self.builder.text()[span.start as usize..span.end as usize].to_string();
        let symbol = Symbol::Func(FuncRef {
            package: Some(PACKAGE.to_string()),
            name,
            receiver: None,
        });
        self.ident(span, Some(symbol), TypeId::INVALID)
    }

    /// A qualified identifier `pkg.Name` at `span`, resolving to `symbol`.
    fn qualified(&mut self, span: Span, package: &str, symbol: Symbol, ty: TypeId) -> ExprId {
        let text = &self.builder.text()[span.start as usize..span.end as usize];
        let dot = u32::try_from(text.find('.').unwrap()).unwrap();
        let name = text[dot as usize + 1..].to_string();
        let base = self.ident(
            Span::new(span.start, span.start + dot),
            Some(Symbol::Package(package.to_string())),
            TypeId::INVALID,
        );
        self.expr(
            ExprKind::Selector {
                base,
                name,
                name_span: Span::new(span.start + dot + 1, span.end),
                symbol: Some(symbol),
                selection: None,
            },
            span,
            ty,
        )
    }

    /// A package function `pkg.Name` at `span`, declared in `package`.
    pub(crate) fn pkg_func(&mut self, span: Span, package: &str) -> ExprId {
        let text = &self.builder.text()[span.start as usize..span.end as usize];
        let name = text[text.find('.').unwrap() + 1..].to_string();
        let symbol = Symbol::Func(FuncRef {
            package: Some(package.to_string()),
            name,
            receiver: None,
        });
        self.qualified(span, package, symbol, TypeId::INVALID)
    }

    /// A package variable `pkg.Name` at `span`.
    pub(crate) fn pkg_var(&mut self, span: Span, package: &str, ty: TypeId) -> ExprId {
        let text = &self.builder.text()[span.start as usize..span.end as usize];
        let name = text[text.find('.').unwrap() + 1..].to_string();
        let symbol = Symbol::Var {
            package: Some(package.to_string()),
            name,
        };
        self.qualified(span, package, symbol, ty)
    }

    /// Method value `recv.name`, declared on `declared_on` in `package`,
    /// reached through `index`.
    pub(crate) fn method(
        &mut self,
        recv: ExprId,
        name: &str,
        declared_on: TypeId,
        package: &str,
        index: Vec<u32>,
    ) -> ExprId {
        self.selector(recv, name, (declared_on, package), index, SelectionKind::MethodVal)
    }

    /// Method expression `T.name`, where `recv` names the type `T`.
    pub(crate) fn method_expr(
        &mut self,
        recv: ExprId,
        name: &str,
        declared_on: TypeId,
        package: &str,
        index: Vec<u32>,
    ) -> ExprId {
        self.selector(recv, name, (declared_on, package), index, SelectionKind::MethodExpr)
    }

    fn selector(
        &mut self,
        recv: ExprId,
        name: &str,
        (declared_on, package): (TypeId, &str),
        index: Vec<u32>,
        kind: SelectionKind,
    ) -> ExprId {
        let recv_expr = self.builder.get(recv);
        let (recv_span, recv_ty) = (recv_expr.span, recv_expr.ty);
        let rest = &self.builder.text()[recv_span.end as usize..];
        let dot = u32::try_from(rest.find(&format!(".{name}")).unwrap()).unwrap();
        let name_start = recv_span.end + dot + 1;
        let name_span = Span::new(name_start, name_start + u32::try_from(name.len()).unwrap());
        self.expr(
            ExprKind::Selector {
                base: recv,
                name: name.to_string(),
                name_span,
                symbol: Some(Symbol::Func(FuncRef {
                    package: Some(package.to_string()),
                    name: name.to_string(),
                    receiver: Some(declared_on),
                })),
                selection: Some(Selection {
                    kind,
                    recv: recv_ty,
                    index,
                    indirect: false,
                }),
            },
            recv_span.merge(name_span),
            TypeId::INVALID,
        )
    }

    /// `func(args)` with result type `results`; `(` directly follows `func`.
    pub(crate) fn call(&mut self, func: ExprId, args: Vec<ExprId>, results: TypeId) -> ExprId {
        let func_span = self.builder.get(func).span;
        let lparen = func_span.end;
        self.expr(
            ExprKind::Call { func, args, lparen },
            Span::new(func_span.start, lparen + 1),
            results,
        )
    }

    /// `base.(T)`, or `base.(type)` when `asserted` is `None`.
    pub(crate) fn assert(&mut self, base: ExprId, asserted: Option<TypeId>) -> ExprId {
        let span = self.builder.get(base).span;
        self.expr(
            ExprKind::TypeAssert { base, asserted },
            span,
            asserted.unwrap_or(TypeId::INVALID),
        )
    }

    // Statements

    /// A statement nested inside another one.
    pub(crate) fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.builder.stmt(kind, Span::DUMMY)
    }

    /// A top-level statement of `main`.
    pub(crate) fn push(&mut self, kind: StmtKind) -> StmtId {
        let id = self.stmt(kind);
        self.body.push(id);
        id
    }

    // Results

    pub(crate) fn unit(self) -> (TypePool, ProgramUnit) {
        let mut builder = self.builder;
        builder.func("main", self.body);
        let unit = ProgramUnit::new(PACKAGE, PACKAGE).with_file(builder.finish());
        (self.pool, unit)
    }

    pub(crate) fn program(self) -> Program {
        let (types, unit) = self.unit();
        Program::new(types, vec![unit])
    }

    pub(crate) fn check(self, config: &CheckConfig) -> Report {
        Checker::new(config).check_program(&self.program())
    }
}
