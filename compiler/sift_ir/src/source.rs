//! Source text and position translation.
//!
//! A [`SourceFile`] owns the text of one file together with a line index, so
//! byte offsets from spans can be turned into the 1-based line/column pairs
//! that diagnostics report, and the offending line can be rendered.

use std::fmt;

/// 1-based line and column. Columns count bytes, not characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One source file: path, text and the byte offset of every line start.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(
    feature = "dump",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SourceText", into = "SourceText")
)]
pub struct SourceFile {
    path: String,
    text: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Create a source file and index its lines.
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = index_lines(&text);
        SourceFile {
            path: path.into(),
            text,
            line_starts,
        }
    }

    /// Path as reported by the loader.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Translate a byte offset into a line/column pair.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(u32::try_from(self.text.len()).unwrap_or(u32::MAX));
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        LineCol {
            line: u32::try_from(line_idx + 1).unwrap_or(u32::MAX),
            column: offset - line_start + 1,
        }
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = usize::try_from(line).ok()?.checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |&next| next as usize);
        let line = self.text.get(start..end)?;
        Some(line.trim_end_matches(['\n', '\r']))
    }
}

fn index_lines(text: &str) -> Vec<u32> {
    let mut starts = vec![0];
    for (idx, byte) in text.bytes().enumerate() {
        if byte == b'\n' && idx + 1 < text.len() {
            starts.push(u32::try_from(idx + 1).unwrap_or(u32::MAX));
        }
    }
    starts
}

/// Wire form of a [`SourceFile`]; the line index is rebuilt on load.
#[cfg(feature = "dump")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SourceText {
    path: String,
    text: String,
}

#[cfg(feature = "dump")]
impl From<SourceText> for SourceFile {
    fn from(raw: SourceText) -> Self {
        SourceFile::new(raw.path, raw.text)
    }
}

#[cfg(feature = "dump")]
impl From<SourceFile> for SourceText {
    fn from(file: SourceFile) -> Self {
        SourceText {
            path: file.path,
            text: file.text,
        }
    }
}
