//! Diagnostic emitters.
//!
//! - Text: one `file:line:col:<TAB>line` record per diagnostic
//! - JSON: an array of objects for tooling
//!
//! Both write to any `io::Write`; write failures on the output stream are
//! not reported, the outcome of a run depends only on the report.

mod json;
mod text;

pub use json::JsonEmitter;
pub use text::TextEmitter;

use std::fmt;

use crate::Diagnostic;

/// Output sink for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);
}

/// Displays a string as the body of a JSON string literal.
pub(crate) struct JsonStr<'a>(pub(crate) &'a str);

impl fmt::Display for JsonStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for c in self.0.chars() {
            match c {
                '"' | '\\' => {
                    f.write_char('\\')?;
                    f.write_char(c)?;
                }
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}
