//! Byte ranges into one source file.
//!
//! The checker only ever reports the start of a node (or the `(` of a call),
//! so a span is two offsets and nothing else. Turning an offset into the
//! line and column users see is [`SourceFile::line_col`](crate::SourceFile::line_col).

use std::fmt;
use std::ops::Range;

/// A byte range that does not fit in `u32` offsets.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SpanError(pub Range<usize>);

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte range {}..{} is past the 4 GiB source limit",
            self.0.start, self.0.end
        )
    }
}

impl std::error::Error for SpanError {}

/// `start..end` in bytes, end exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// For nodes with no source text of their own.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub fn try_from_range(range: Range<usize>) -> Result<Self, SpanError> {
        match (u32::try_from(range.start), u32::try_from(range.end)) {
            (Ok(start), Ok(end)) => Ok(Span { start, end }),
            _ => Err(SpanError(range)),
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

crate::static_assert_size!(Span, 8);
