//! JSON output.
//!
//! One object per diagnostic with every field present; `selector` and
//! `callee` are `null` when unknown.

use std::io::Write;

use crate::Diagnostic;

use super::{DiagnosticEmitter, JsonStr};

/// Writes diagnostics as a pretty-printed JSON array.
///
/// Call [`JsonEmitter::begin`] before and [`JsonEmitter::end`] after the
/// diagnostics to produce a complete array.
pub struct JsonEmitter<W: Write> {
    writer: W,
    empty: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            empty: true,
        }
    }

    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    pub fn end(&mut self) {
        let close = if self.empty { "]" } else { "\n]" };
        let _ = writeln!(self.writer, "{close}");
    }

    fn field(&mut self, key: &str, value: &str) {
        let _ = write!(self.writer, ",\n    \"{key}\": \"{}\"", JsonStr(value));
    }

    fn nullable_field(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => self.field(key, value),
            None => {
                let _ = write!(self.writer, ",\n    \"{key}\": null");
            }
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let separator = if self.empty { "" } else { "," };
        self.empty = false;

        let _ = write!(
            self.writer,
            "{separator}\n  {{\n    \"file\": \"{}\"",
            JsonStr(&diagnostic.file)
        );
        let _ = write!(
            self.writer,
            ",\n    \"line\": {},\n    \"column\": {}",
            diagnostic.line, diagnostic.column
        );
        self.field("kind", diagnostic.kind.as_str());
        self.field("text", &diagnostic.line_text);
        self.nullable_field("selector", diagnostic.selector.as_deref());
        self.nullable_field("callee", diagnostic.callee.as_deref());
        let _ = write!(self.writer, "\n  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
