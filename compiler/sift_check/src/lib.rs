//! Detection of unchecked failure values.
//!
//! Given type-checked program units, reports every call whose `error` result
//! is dropped, optionally every `error` assigned to `_`, and optionally every
//! type assertion that would panic instead of reporting a mismatch.
//!
//! ```text
//! LoadRequest -> ProgramLoader -> verify -> Checker (per unit, parallel)
//!     -> StatementVisitor (+ classify, ExclusionIndex, selection chain)
//!     -> Aggregator -> Report
//! ```

mod callee;
mod checker;
mod config;
mod exclusions;
mod generated;
mod loader;
mod visitor;

#[cfg(test)]
mod fixture;

pub use callee::{qualified_name, resolve_callee, Callee};
pub use checker::Checker;
pub use config::{CheckConfig, CheckFlags};
pub use exclusions::{
    non_vendored_path, read_excludes, ExcludeFileError, ExclusionIndex, ExclusionReason,
    Exclusions, DEFAULT_EXCLUDED_SYMBOLS,
};
pub use generated::{is_generated, is_test_file};
pub use loader::{
    analyze, pattern_matches, select_units, verify, LoadError, LoadRequest, ModMode,
    ProgramLoader,
};
pub use visitor::check_file;
