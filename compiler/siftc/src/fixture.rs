//! A small typed program and its dump, shared by the driver tests.

use std::io::Write;

use tempfile::NamedTempFile;

use sift_ir::builder::TreeBuilder;
use sift_ir::{
    AssignOp, ExprId, ExprKind, FuncRef, Program, ProgramUnit, Span, StmtKind, Symbol, TypeId,
    TypePool,
};

pub(crate) const PATH: &str = "/src/app/main.go";

pub(crate) const SOURCE: &str = "package main

func main() {
\tos.Remove(\"x\")
\t_ = os.Remove(\"y\")
\tfmt.Println(\"hi\")
}
";

fn span(builder: &TreeBuilder, needle: &str, nth: usize) -> Span {
    builder
        .find_nth(needle, nth)
        .unwrap_or_else(|| panic!("{needle:?} not in sample source"))
}

/// `pkg.name(literal)` where `callee` is the `nth` occurrence of `pkg.name`.
fn call(
    builder: &mut TreeBuilder,
    callee: &str,
    nth: usize,
    literal: &str,
    results: TypeId,
) -> ExprId {
    let callee_span = span(builder, callee, nth);
    let (package, name) = callee.split_once('.').unwrap();
    let dot = callee_span.start + u32::try_from(package.len()).unwrap();
    let base = builder.expr(
        ExprKind::Ident {
            name: package.to_string(),
            symbol: Some(Symbol::Package(package.to_string())),
        },
        Span::new(callee_span.start, dot),
        TypeId::INVALID,
    );
    let func = builder.expr(
        ExprKind::Selector {
            base,
            name: name.to_string(),
            name_span: Span::new(dot + 1, callee_span.end),
            symbol: Some(Symbol::Func(FuncRef {
                package: Some(package.to_string()),
                name: name.to_string(),
                receiver: None,
            })),
            selection: None,
        },
        callee_span,
        TypeId::INVALID,
    );
    let arg_span = span(builder, literal, 0);
    let arg = builder.expr(ExprKind::BasicLit, arg_span, TypeId::STRING);
    builder.expr(
        ExprKind::Call {
            func,
            args: vec![arg],
            lparen: callee_span.end,
        },
        Span::new(callee_span.start, arg_span.end + 1),
        results,
    )
}

/// Package `example.com/app` with `main.go` above, plus an empty
/// `example.com/app/docs`.
pub(crate) fn sample_program() -> Program {
    let mut types = TypePool::new();
    let println_results = types.tuple(vec![TypeId::INT, TypeId::ERROR]);

    let mut builder = TreeBuilder::new(PATH, SOURCE);
    let remove_x = call(&mut builder, "os.Remove", 0, "\"x\"", TypeId::ERROR);
    let remove_y = call(&mut builder, "os.Remove", 1, "\"y\"", TypeId::ERROR);
    let println = call(&mut builder, "fmt.Println", 0, "\"hi\"", println_results);
    let blank_span = span(&builder, "_", 0);
    let blank = builder.expr(
        ExprKind::Ident {
            name: "_".to_string(),
            symbol: None,
        },
        blank_span,
        TypeId::INVALID,
    );

    let body = vec![
        builder.stmt(StmtKind::Expr(remove_x), Span::DUMMY),
        builder.stmt(
            StmtKind::Assign {
                lhs: vec![blank],
                rhs: vec![remove_y],
                op: AssignOp::Assign,
            },
            Span::DUMMY,
        ),
        builder.stmt(StmtKind::Expr(println), Span::DUMMY),
    ];
    builder.func("main", body);

    let app = ProgramUnit::new("example.com/app", "main").with_file(builder.finish());
    let docs = ProgramUnit::new("example.com/app/docs", "docs");
    Program::new(types, vec![app, docs])
}

pub(crate) fn write_dump(program: &Program) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut file, program).unwrap();
    file.flush().unwrap();
    file
}
