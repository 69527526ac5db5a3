//! Source Location Utilities
//!
//! Converts byte offsets into human-readable line/column positions for error
//! messages. Lines are split on `\n` only; a `\r` before it is treated as an
//! ordinary trailing byte of the line.

use std::fmt;

/// A position in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in UTF-8 characters)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of input
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Calculate position from an offset in the input
    ///
    /// Offsets past the end are clamped to the end of input.
    pub fn from_offset(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];

        let line = 1 + memchr::memchr_iter(b'\n', before).count();
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        let column = 1 + count_chars(&before[line_start..]);

        Self {
            offset,
            line,
            column,
        }
    }

    /// The full text of the line containing this position, without its
    /// line terminator
    pub fn line_text<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        let offset = self.offset.min(input.len());
        let start = memchr::memrchr(b'\n', &input[..offset]).map_or(0, |i| i + 1);
        let end = memchr::memchr(b'\n', &input[offset..]).map_or(input.len(), |i| offset + i);
        let line = &input[start..end];
        line.strip_suffix(b"\r").unwrap_or(line)
    }
}

/// Count UTF-8 characters by skipping continuation bytes
#[inline]
fn count_chars(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count()
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}
