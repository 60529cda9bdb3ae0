use super::*;
use crate::{Aggregator, Diagnostic, DiagnosticKind};
use pretty_assertions::assert_eq;

#[test]
fn test_exit_codes() {
    assert_eq!(Outcome::Clean.exit_code(), 0);
    assert_eq!(Outcome::Findings.exit_code(), 1);
    assert_eq!(Outcome::Fatal.exit_code(), 2);
}

#[test]
fn test_from_report() {
    assert_eq!(Outcome::from_report(&Aggregator::new().finish()), Outcome::Clean);

    let agg = Aggregator::new();
    agg.merge(vec![Diagnostic {
        file: "a.go".to_string(),
        line: 1,
        column: 1,
        line_text: "f()".to_string(),
        kind: DiagnosticKind::UncheckedCall,
        selector: None,
        callee: None,
    }]);
    assert_eq!(Outcome::from_report(&agg.finish()), Outcome::Findings);
}
