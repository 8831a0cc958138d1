use std::ops::Range;

/// A byte range `[start, end)` into the source text.
///
/// Tree nodes store spans rather than copied text: slicing the source with a
/// span reproduces the exact bytes the author wrote, formatting included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slices `source`, clamping to its bounds so a stale span never panics.
    pub fn slice(self, source: &str) -> &str {
        let end = self.end.min(source.len());
        let start = self.start.min(end);
        source.get(start..end).unwrap_or_default()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span {
            start: range.start,
            end: range.end,
        }
    }
}
