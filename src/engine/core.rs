//! Editing engine: buffer, cursor, selection and caps state
//!
//! Every operation completes synchronously and leaves the state consistent:
//! the cursor is within `[0, len]`, a selection (if any) is non-empty and in
//! bounds. Bad positions are clamped, never reported.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::caps::{rebindings, CapsState, CapsToggle};
use crate::layout::Layout;
use crate::text::{clamp_cursor, offset_cursor, Selection, TextBuffer};

/// Snapshot handed back to the adapter after an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub text: String,
    pub cursor: usize,
    pub selection: Option<Selection>,
    pub caps_lock: bool,
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Buffer, cursor or selection changed (or may have)
    Edited(EngineState),
    /// Commit requested; the buffer is unchanged
    Submitted(EngineState),
    /// Alphabetic keys need relabeling
    CapsToggled(CapsToggle),
}

#[derive(Debug, Clone, Default)]
pub struct EditingEngine {
    buffer: TextBuffer,
    cursor: usize,
    selection: Option<Selection>,
    caps: CapsState,
}

impl EditingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing content, cursor at the end
    pub fn with_text(text: &str) -> Self {
        let buffer = TextBuffer::from_text(text);
        let cursor = buffer.len();
        Self {
            buffer,
            cursor,
            selection: None,
            caps: CapsState::default(),
        }
    }

    pub fn with_caps(mut self, caps: CapsState) -> Self {
        self.caps = caps;
        self
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn caps(&self) -> CapsState {
        self.caps
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            text: self.buffer.to_string(),
            cursor: self.cursor,
            selection: self.selection,
            caps_lock: self.caps.is_upper(),
        }
    }

    /// Insert text at the cursor, or replace the active selection with it
    pub fn insert(&mut self, text: &str) -> EngineState {
        let start = match self.selection.take() {
            Some(sel) => {
                self.buffer.splice(sel.range(), text);
                sel.start
            }
            None => {
                self.buffer.splice(self.cursor..self.cursor, text);
                self.cursor
            }
        };
        self.cursor = start + text.chars().count();
        log::debug!("insert {:?}: cursor -> {}", text, self.cursor);
        self.state()
    }

    /// Remove the active selection, or the char before the cursor
    pub fn delete(&mut self) -> EngineState {
        match self.selection.take() {
            Some(sel) => {
                self.buffer.remove(sel.range());
                self.cursor = sel.start;
            }
            None if self.cursor > 0 => {
                self.buffer.remove(self.cursor - 1..self.cursor);
                self.cursor -= 1;
            }
            None => {}
        }
        log::debug!("delete: cursor -> {}", self.cursor);
        self.state()
    }

    pub fn move_cursor(&mut self, delta: isize) -> EngineState {
        self.selection = None;
        self.cursor = offset_cursor(self.cursor, delta, self.buffer.len());
        log::debug!("move cursor by {}: cursor -> {}", delta, self.cursor);
        self.state()
    }

    /// Resynchronize cursor and selection from the bound field
    ///
    /// An empty selection counts as no selection.
    pub fn set_focus(&mut self, position: usize, selection: Option<Selection>) -> EngineState {
        let len = self.buffer.len();
        if position > len {
            log::warn!("focus position {} past end of buffer ({}), clamping", position, len);
        }
        self.cursor = clamp_cursor(position, len);
        self.selection = Selection::normalize(selection, len);
        log::debug!("focus: cursor {} selection {:?}", self.cursor, self.selection);
        self.state()
    }

    /// Flip caps and report the keys that must be relabeled and rebound
    pub fn toggle_caps(&mut self, layout: &Layout) -> CapsToggle {
        self.caps.toggle();
        log::debug!("caps lock -> {}", self.caps.is_upper());
        CapsToggle {
            caps_lock: self.caps.is_upper(),
            rebindings: rebindings(layout, self.caps),
        }
    }

    /// Request a commit of the current buffer
    pub fn submit(&mut self) -> EngineState {
        self.selection = None;
        log::debug!("submit {:?}", self.buffer.as_str());
        self.state()
    }

    pub fn clear(&mut self) -> EngineState {
        self.buffer.clear();
        self.cursor = 0;
        self.selection = None;
        log::debug!("clear");
        self.state()
    }

    pub fn apply(&mut self, action: &Action, layout: &Layout) -> Effect {
        match action {
            Action::Insert(text) => Effect::Edited(self.insert(text)),
            Action::Delete => Effect::Edited(self.delete()),
            Action::MoveCursor(delta) => Effect::Edited(self.move_cursor(*delta)),
            Action::ToggleCaps => Effect::CapsToggled(self.toggle_caps(layout)),
            Action::Submit => Effect::Submitted(self.submit()),
            Action::Clear => Effect::Edited(self.clear()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(text: &str, cursor: usize) -> EditingEngine {
        let mut engine = EditingEngine::with_text(text);
        engine.set_focus(cursor, None);
        engine
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut engine = engine_at("cat", 1);
        let state = engine.insert("h");
        assert_eq!(state.text, "chat");
        assert_eq!(state.cursor, 2);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut engine = EditingEngine::with_text("hello world");
        engine.set_focus(0, Some(Selection::new(0, 5)));
        let state = engine.insert("X");
        assert_eq!(state.text, "X world");
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_insert_multichar_advances_by_char_count() {
        let mut engine = engine_at("ab", 1);
        let state = engine.insert("ïx");
        assert_eq!(state.text, "aïxb");
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn test_delete_runs_down_to_empty() {
        let mut engine = engine_at("abc", 3);
        for (text, cursor) in [("ab", 2), ("a", 1), ("", 0), ("", 0)] {
            let state = engine.delete();
            assert_eq!(state.text, text);
            assert_eq!(state.cursor, cursor);
        }
    }

    #[test]
    fn test_delete_selection() {
        let mut engine = EditingEngine::with_text("hello world");
        engine.set_focus(11, Some(Selection::new(5, 11)));
        let state = engine.delete();
        assert_eq!(state.text, "hello");
        assert_eq!(state.cursor, 5);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_delete_at_start_is_noop() {
        let mut engine = engine_at("abc", 0);
        let state = engine.delete();
        assert_eq!(state.text, "abc");
        assert_eq!(state.cursor, 0);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_delete_selection_from_start_clears_it() {
        let mut engine = EditingEngine::with_text("abc");
        engine.set_focus(0, Some(Selection::new(0, 2)));
        let state = engine.delete();
        assert_eq!(state.text, "c");
        assert_eq!(state.cursor, 0);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_empty_selection_deletes_before_cursor() {
        let mut engine = EditingEngine::with_text("abc");
        engine.set_focus(2, Some(Selection::new(2, 2)));
        let state = engine.delete();
        assert_eq!(state.text, "ac");
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut engine = engine_at("abc", 1);
        assert_eq!(engine.move_cursor(-5).cursor, 0);
        assert_eq!(engine.move_cursor(100).cursor, 3);
        assert_eq!(engine.move_cursor(-1).cursor, 2);
    }

    #[test]
    fn test_move_cursor_clears_selection() {
        let mut engine = EditingEngine::with_text("abcdef");
        engine.set_focus(2, Some(Selection::new(2, 4)));
        let state = engine.move_cursor(1);
        assert_eq!(state.cursor, 3);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_set_focus_clamps() {
        let mut engine = EditingEngine::with_text("abc");
        let state = engine.set_focus(5, None);
        assert_eq!(state.cursor, 3);

        let state = engine.set_focus(1, Some(Selection::new(2, 9)));
        assert_eq!(state.selection, Some(Selection::new(2, 3)));
    }

    #[test]
    fn test_empty_selection_is_no_selection() {
        let mut engine = EditingEngine::with_text("abc");
        engine.set_focus(2, Some(Selection::new(2, 2)));
        assert_eq!(engine.selection(), None);
        assert_eq!(engine.insert("x").text, "abxc");
    }

    #[test]
    fn test_set_focus_is_idempotent() {
        let mut engine = EditingEngine::with_text("abc");
        let first = engine.set_focus(2, None);
        let second = engine.set_focus(2, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_toggle_caps_keeps_edit_state() {
        let layout = Layout::basic();
        let mut engine = EditingEngine::with_text("hello");
        engine.set_focus(0, Some(Selection::new(0, 2)));

        let toggle = engine.toggle_caps(&layout);
        assert!(!toggle.caps_lock);
        assert_eq!(engine.text(), "hello");
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.selection(), Some(Selection::new(0, 2)));
    }

    #[test]
    fn test_submit_clears_selection_only() {
        let mut engine = EditingEngine::with_text("hello");
        engine.set_focus(1, Some(Selection::new(1, 3)));
        let state = engine.submit();
        assert_eq!(state.text, "hello");
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_clear() {
        let mut engine = EditingEngine::with_text("hello");
        let state = engine.clear();
        assert_eq!(state.text, "");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_apply_dispatch() {
        let layout = Layout::basic();
        let mut engine = EditingEngine::new();

        engine.apply(&Action::Insert("ab".to_string()), &layout);
        engine.apply(&Action::MoveCursor(-1), &layout);
        let effect = engine.apply(&Action::Delete, &layout);
        match effect {
            Effect::Edited(state) => {
                assert_eq!(state.text, "b");
                assert_eq!(state.cursor, 0);
            }
            other => panic!("unexpected effect {:?}", other),
        }

        assert!(matches!(engine.apply(&Action::Submit, &layout), Effect::Submitted(_)));
        assert!(matches!(engine.apply(&Action::ToggleCaps, &layout), Effect::CapsToggled(_)));
    }
}
