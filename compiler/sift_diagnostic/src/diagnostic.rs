use std::fmt;

use sift_ir::SourceFile;

/// Placeholder for a line that cannot be read back from the source.
const MISSING_LINE: &str = "??";

/// What was left unchecked.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub enum DiagnosticKind {
    /// A call statement whose failure result is dropped.
    UncheckedCall,
    /// A failure result assigned to `_`.
    UncheckedBlank,
    /// A single-result type assertion that panics instead of reporting.
    UncheckedAssertion,
}

impl DiagnosticKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UncheckedCall => "unchecked-call",
            DiagnosticKind::UncheckedBlank => "unchecked-blank",
            DiagnosticKind::UncheckedAssertion => "unchecked-assertion",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported site.
///
/// Field order is the report order: file, line, column, line text, kind.
/// Two diagnostics agreeing on those five fields are the same finding, even
/// when they came from different build configurations of one package.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct Diagnostic {
    pub file: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based byte column.
    pub column: u32,
    /// The source line, trimmed.
    pub line_text: String,
    pub kind: DiagnosticKind,
    /// Name of the selected member for method calls (`Close` in `f.Close()`).
    pub selector: Option<String>,
    /// Qualified callee name when known (`os.Remove`, `(*os.File).Close`).
    pub callee: Option<String>,
}

impl Diagnostic {
    /// A diagnostic at byte `offset` of `source`.
    pub fn at(source: &SourceFile, offset: u32, kind: DiagnosticKind) -> Self {
        let pos = source.line_col(offset);
        let line_text = source
            .line_text(pos.line)
            .map_or(MISSING_LINE, str::trim)
            .to_string();
        Diagnostic {
            file: source.path().to_string(),
            line: pos.line,
            column: pos.column,
            line_text,
            kind,
            selector: None,
            callee: None,
        }
    }

    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn with_callee(mut self, callee: impl Into<String>) -> Self {
        self.callee = Some(callee.into());
        self
    }

    /// Identity used for deduplication.
    pub fn same_site(&self, other: &Diagnostic) -> bool {
        self.file == other.file
            && self.line == other.line
            && self.column == other.column
            && self.kind == other.kind
            && self.line_text == other.line_text
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}\t{}",
            self.file, self.line, self.column, self.line_text
        )
    }
}
