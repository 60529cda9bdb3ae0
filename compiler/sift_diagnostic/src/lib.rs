//! Diagnostics for errsift.
//!
//! - [`Diagnostic`]: one unchecked failure value, already translated to
//!   file/line/column with the offending source line attached.
//! - [`Aggregator`]: thread-safe collection of per-unit results; produces a
//!   deduplicated, deterministically ordered [`Report`].
//! - [`emitter`]: text and JSON output.
//! - [`Outcome`]: exit status selection.

mod aggregator;
mod diagnostic;
pub mod emitter;
mod outcome;

pub use aggregator::{Aggregator, Report};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use emitter::{DiagnosticEmitter, JsonEmitter, TextEmitter};
pub use outcome::Outcome;
