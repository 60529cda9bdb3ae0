use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;
use sift_diagnostic::DiagnosticKind;
use sift_ir::{AssignOp, ExprId, Span, StmtKind, TypeId};

use crate::fixture::Fixture;
use crate::{CheckFlags, Exclusions};

const MAIN: &str = "package a\n\nfunc main() {\n\tf()\n}\n";

fn lines(report: &Report) -> Vec<(String, u32)> {
    report
        .diagnostics()
        .iter()
        .map(|d| (d.file.clone(), d.line))
        .collect()
}

/// `f()` as the only statement of `main`.
fn bare_call(fx: &mut Fixture) {
    let f = fx.func(fx.span_within("\tf()", "f"));
    let call = fx.call(f, Vec::new(), TypeId::ERROR);
    fx.push(StmtKind::Expr(call));
}

#[test]
fn test_reports_in_plain_unit() {
    let mut fx = Fixture::new(MAIN);
    bare_call(&mut fx);
    let report = fx.check(&CheckConfig::default());
    assert_eq!(lines(&report), vec![("a/main.go".to_string(), 4)]);
    assert!(report.empty_units().is_empty());
}

#[test]
fn test_unsafe_package_is_skipped() {
    let mut fx = Fixture::new(MAIN);
    bare_call(&mut fx);
    let mut program = fx.program();
    program.units[0].path = UNSAFE_PACKAGE.to_string();

    let config = CheckConfig::default();
    assert!(!Checker::new(&config).check_program(&program).has_diagnostics());
}

#[test]
fn test_test_files_skipped_on_request() {
    let build = || {
        let mut fx = Fixture::with_path("a/main_test.go", MAIN);
        bare_call(&mut fx);
        fx.program()
    };

    let keep = CheckConfig::default();
    assert_eq!(Checker::new(&keep).check_program(&build()).diagnostics().len(), 1);

    let skip = CheckConfig::new(
        CheckFlags::empty(),
        Exclusions {
            test_files: true,
            ..Exclusions::default()
        },
    );
    assert!(!Checker::new(&skip).check_program(&build()).has_diagnostics());
}

#[test]
fn test_generated_files_skipped_on_request() {
    let text = format!("// Code generated by stringer. DO NOT EDIT.\n\n{MAIN}");
    let build = || {
        let mut fx = Fixture::new(&text);
        bare_call(&mut fx);
        fx.program()
    };

    let keep = CheckConfig::default();
    assert_eq!(
        lines(&Checker::new(&keep).check_program(&build())),
        vec![("a/main.go".to_string(), 6)]
    );

    let skip = CheckConfig::new(
        CheckFlags::empty(),
        Exclusions {
            generated_files: true,
            ..Exclusions::default()
        },
    );
    assert!(!Checker::new(&skip).check_program(&build()).has_diagnostics());
}

#[test]
fn test_units_without_files_are_listed() {
    let mut fx = Fixture::new(MAIN);
    bare_call(&mut fx);
    let mut program = fx.program();
    program.units.push(ProgramUnit::new("a/docs", "docs"));
    program.units.push(ProgramUnit::new("a/assets", "assets"));

    let config = CheckConfig::default();
    let report = Checker::new(&config).check_program(&program);
    assert_eq!(report.diagnostics().len(), 1);
    assert_eq!(report.empty_units(), &["a/assets".to_string(), "a/docs".to_string()]);
}

/// Units `a`, `b`, `c`, each with one unchecked call, sharing one pool.
fn three_units() -> Program {
    let mut units = Vec::new();
    let mut types = None;
    for name in ["c", "a", "b"] {
        let mut fx = Fixture::with_path(&format!("{name}/main.go"), MAIN);
        bare_call(&mut fx);
        let (pool, mut unit) = fx.unit();
        unit.id = name.to_string();
        unit.path = name.to_string();
        types.get_or_insert(pool);
        units.push(unit);
    }
    Program::new(types.unwrap_or_default(), units)
}

#[test]
fn test_parallel_units_sorted() {
    let program = three_units();
    let config = CheckConfig::default();
    let checker = Checker::new(&config);

    let expected = vec![
        ("a/main.go".to_string(), 4),
        ("b/main.go".to_string(), 4),
        ("c/main.go".to_string(), 4),
    ];
    for _ in 0..4 {
        assert_eq!(lines(&checker.check_program(&program)), expected);
    }
}

#[test]
fn test_check_unit_keeps_visit_order() {
    let program = three_units();
    let config = CheckConfig::default();
    let diagnostics = Checker::new(&config).check_unit(&program.types, &program.units[0]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, "c/main.go");
}

// Properties over generated statement lists

/// One line of a generated `main` body.
#[derive(Copy, Clone, Debug)]
enum Shape {
    /// `f()` or `g()`
    Bare { fails: bool },
    /// `_ = f()` or `_ = g()`
    Blank { fails: bool },
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        any::<bool>().prop_map(|fails| Shape::Bare { fails }),
        any::<bool>().prop_map(|fails| Shape::Blank { fails }),
    ]
}

fn offset(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap()
}

/// A fixture whose `main` holds one statement per shape, one per line.
fn build(shapes: &[Shape]) -> Fixture {
    let mut text = String::new();
    let mut sites = Vec::new();
    for shape in shapes {
        let (fails, blank) = match *shape {
            Shape::Bare { fails } => (fails, false),
            Shape::Blank { fails } => (fails, true),
        };
        let start = offset(&text);
        let name = if fails { "f" } else { "g" };
        if blank {
            text.push_str("_ = ");
        }
        sites.push((start, offset(&text), fails, blank));
        text.push_str(name);
        text.push_str("()\n");
    }

    let mut fx = Fixture::new(&text);
    for (start, func_start, fails, blank) in sites {
        let results = if fails { TypeId::ERROR } else { TypeId::INT };
        let func = fx.func(Span::new(func_start, func_start + 1));
        let call: ExprId = fx.call(func, Vec::new(), results);
        if blank {
            let target = fx.local(Span::new(start, start + 1), TypeId::INVALID);
            fx.push(StmtKind::Assign {
                lhs: vec![target],
                rhs: vec![call],
                op: AssignOp::Assign,
            });
        } else {
            fx.push(StmtKind::Expr(call));
        }
    }
    fx
}

fn kinds(report: &Report) -> Vec<(u32, DiagnosticKind)> {
    report.diagnostics().iter().map(|d| (d.line, d.kind)).collect()
}

proptest! {
    #[test]
    fn prop_checking_is_repeatable(shapes in prop::collection::vec(shape(), 0..24)) {
        let program = build(&shapes).program();
        let config = CheckConfig::new(CheckFlags::BLANK, Exclusions::default());
        let checker = Checker::new(&config);
        prop_assert_eq!(
            checker.check_program(&program),
            checker.check_program(&program)
        );
    }

    #[test]
    fn prop_blank_mode_only_adds(shapes in prop::collection::vec(shape(), 0..24)) {
        let plain = build(&shapes).check(&CheckConfig::default());
        let blank = build(&shapes).check(&CheckConfig::new(CheckFlags::BLANK, Exclusions::default()));

        for diagnostic in plain.diagnostics() {
            prop_assert!(blank.diagnostics().contains(diagnostic));
        }
        let expected_blank = shapes
            .iter()
            .filter(|s| matches!(s, Shape::Blank { fails: true }))
            .count();
        prop_assert_eq!(
            blank.diagnostics().len(),
            plain.diagnostics().len() + expected_blank
        );
    }

    #[test]
    fn prop_one_report_per_unchecked_line(shapes in prop::collection::vec(shape(), 0..24)) {
        let report = build(&shapes).check(&CheckConfig::new(CheckFlags::BLANK, Exclusions::default()));
        let expected: Vec<(u32, DiagnosticKind)> = shapes
            .iter()
            .zip(1u32..)
            .filter_map(|(shape, line)| match *shape {
                Shape::Bare { fails: true } => Some((line, DiagnosticKind::UncheckedCall)),
                Shape::Blank { fails: true } => Some((line, DiagnosticKind::UncheckedBlank)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(kinds(&report), expected);
    }

    #[test]
    fn prop_no_failure_results_no_reports(count in 0usize..24, blank in any::<bool>()) {
        let shapes: Vec<Shape> = (0..count)
            .map(|i| if blank && i % 2 == 0 {
                Shape::Blank { fails: false }
            } else {
                Shape::Bare { fails: false }
            })
            .collect();
        let flags = CheckFlags::BLANK | CheckFlags::ASSERTS;
        let report = build(&shapes).check(&CheckConfig::new(flags, Exclusions::default()));
        prop_assert!(!report.has_diagnostics());
    }

    #[test]
    fn prop_excluded_callees_never_reported(shapes in prop::collection::vec(shape(), 0..24)) {
        let mut exclusions = Exclusions::default();
        exclusions
            .symbol_regexes
            .insert(String::new(), Regex::new("^[fg]$").unwrap());
        let report = build(&shapes).check(&CheckConfig::new(CheckFlags::BLANK, exclusions));
        prop_assert!(!report.has_diagnostics());
    }
}
