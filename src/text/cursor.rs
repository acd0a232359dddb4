//! Cursor and selection management for text editing
//!
//! Positions are char offsets into a single-line buffer.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Clamp a cursor position into `[0, len]`
pub fn clamp_cursor(pos: usize, len: usize) -> usize {
    pos.min(len)
}

/// Move a cursor by a signed delta, clamped to `[0, len]`
pub fn offset_cursor(pos: usize, delta: isize, len: usize) -> usize {
    let moved = if delta.is_negative() {
        pos.saturating_sub(delta.unsigned_abs())
    } else {
        pos.saturating_add(delta.unsigned_abs())
    };
    clamp_cursor(moved, len)
}

/// A contiguous selected span from start (inclusive) to end (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection; reversed bounds are swapped so `start <= end`
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Restrict both bounds to a buffer of `len` chars
    pub fn clamped(self, len: usize) -> Self {
        Self::new(clamp_cursor(self.start, len), clamp_cursor(self.end, len))
    }

    /// Check if this selection covers nothing (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars
    ///
    /// Zero for a hand-built selection whose bounds are reversed.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Clamp to `len` and drop the selection if nothing remains selected
    pub fn normalize(selection: Option<Selection>, len: usize) -> Option<Selection> {
        selection
            .map(|sel| sel.clamped(len))
            .filter(|sel| !sel.is_empty())
    }
}
