//! Type queries for errsift.
//!
//! - [`classify`]: which result positions of a call hold the predeclared
//!   `error` type (the Call Classifier).
//! - [`walker`]: the path from a method call's receiver, through embedded
//!   struct fields and embedded interfaces, to the interface that explicitly
//!   declares the method (the Selection Chain).
//! - [`method_set`]: explicit and full interface method sets.
//! - [`format`]: type strings in the qualified form exclusion rules are
//!   written in (`*bytes.Buffer`, `io.Writer`, `*math/rand.Rand`).
//!
//! Every query is infallible: unclassifiable input reads as "not a failure"
//! and malformed selections read as "not applicable".

pub mod classify;
pub mod format;
pub mod method_set;
pub mod walker;

pub use classify::{classify_call, is_recover, ResultClassification};
pub use format::type_string;
pub use method_set::{declares_method, explicitly_declares_method};
pub use walker::{selection_chain, SelectionChain};
