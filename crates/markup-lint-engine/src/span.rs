use serde::Serialize;

/// A byte range `[start, start + length)` into the original document text.
///
/// Every diagnostic, attribute match and tree node stores a span rather than
/// copied text, so slicing the document with it reproduces the exact source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Span {
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Builds a span from `[start, end)`. Uses saturating subtraction so an
    /// inverted pair collapses to an empty span at `start`.
    #[must_use]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset.
    #[must_use]
    pub fn end(self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.length == 0
    }

    /// True if `offset` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Moves a span that is relative to some sub-string so it is relative to
    /// the text that sub-string was cut from.
    #[must_use]
    pub fn offset_by(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            length: self.length,
        }
    }

    /// Returns the text covered by this span, or `None` if it does not lie on
    /// char boundaries inside `text`.
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.start..self.end())
    }
}
