//! Line-oriented text output.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// Text emitter.
///
/// Paths are printed as recorded unless a base directory is set, in which
/// case paths under it are printed relative to it. In verbose mode the
/// qualified callee name, when known, follows the source line.
pub struct TextEmitter<W: Write> {
    writer: W,
    base: Option<PathBuf>,
    verbose: bool,
}

impl<W: Write> TextEmitter<W> {
    pub fn new(writer: W) -> Self {
        TextEmitter {
            writer,
            base: None,
            verbose: false,
        }
    }

    /// Print paths relative to `base`.
    #[must_use]
    pub fn relative_to(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn display_path<'a>(&self, file: &'a str) -> std::borrow::Cow<'a, str> {
        let Some(base) = &self.base else {
            return file.into();
        };
        match Path::new(file).strip_prefix(base) {
            Ok(rel) => rel.to_string_lossy().into_owned().into(),
            Err(_) => file.into(),
        }
    }
}

impl<W: Write> DiagnosticEmitter for TextEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let path = self.display_path(&diagnostic.file);
        let _ = write!(
            self.writer,
            "{path}:{}:{}\t{}",
            diagnostic.line, diagnostic.column, diagnostic.line_text
        );
        if self.verbose {
            if let Some(callee) = &diagnostic.callee {
                let _ = write!(self.writer, "\t{callee}");
            }
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
