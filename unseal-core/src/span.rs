//! Offset + length views into a caller-owned buffer.
//!
//! Walk results never hold slices of the input. Each segment or chunk records
//! where its bytes live, and the caller resolves that against the same buffer
//! it handed to the walker.

/// A byte range inside the buffer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Span covering `start..end`.
    pub const fn between(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end - start,
        }
    }

    /// One past the last byte covered.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve the span against the buffer it was produced from.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than `self.end()`, which only happens when
    /// a span is resolved against a different buffer than the one walked.
    pub fn slice<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        &buf[self.offset..self.end()]
    }
}
