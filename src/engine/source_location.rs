//! Source Location Utilities
//!
//! Positions are tracked while scanning so that records and errors can point
//! back into the input. Lines advance on `\n`; columns count characters, not
//! bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, UTF-8 aware)
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
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Step past a single character
    #[inline]
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Step past a run of text in one go
    ///
    /// Equivalent to calling [`advance`](Self::advance) for every character
    /// of `text`, but uses `memchr` to find line breaks.
    pub fn advance_str(&mut self, text: &str) {
        let bytes = text.as_bytes();
        self.offset += bytes.len();
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => {
                self.line += memchr::memchr_iter(b'\n', bytes).count();
                self.column = 1 + text[last + 1..].chars().count();
            }
            None => self.column += text.chars().count(),
        }
    }
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

/// Get the line content at a given offset
///
/// A trailing `\r` is not part of the returned line.
pub fn get_line_at_offset(input: &str, offset: usize) -> &str {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }

    let line_start = input[..offset].rfind('\n').map(|pos| pos + 1).unwrap_or(0);
    let line_end = input[offset..]
        .find('\n')
        .map(|pos| offset + pos)
        .unwrap_or(input.len());

    input[line_start..line_end].trim_end_matches('\r')
}
