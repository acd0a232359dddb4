//! Text buffer implementation (Layer 0)
//!
//! Single-line text storage addressed by char offsets. Every range is
//! clamped to the buffer, so no operation here can panic on bad input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Editable text content of the bound field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from a string
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clamp a char offset to `[0, len]`
    pub fn clamp(&self, pos: usize) -> usize {
        pos.min(self.len())
    }

    /// Get the text covered by a char range
    pub fn slice(&self, range: Range<usize>) -> &str {
        let bytes = self.byte_range(range);
        &self.text[bytes]
    }

    /// Replace a char range with new text
    ///
    /// An empty range is a plain insertion.
    pub fn splice(&mut self, range: Range<usize>, text: &str) {
        let bytes = self.byte_range(range);
        self.text.replace_range(bytes, text);
    }

    /// Remove a char range, returning the removed text
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let bytes = self.byte_range(range);
        self.text.drain(bytes).collect()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Convert a char offset to a byte offset, clamping to the end
    fn byte_offset(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn byte_range(&self, range: Range<usize>) -> Range<usize> {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end.max(range.start));
        start..end
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
