//! Closed set of editing operations
//!
//! Layout keys name their action as data; this resolves that name to a
//! concrete operation once, when the layout is bound.

use serde::{Deserialize, Serialize};

use crate::layout::{ActionName, KeyDescriptor};

/// An editing operation with its arguments resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "camelCase")]
pub enum Action {
    Insert(String),
    Delete,
    MoveCursor(isize),
    ToggleCaps,
    Submit,
    /// Empty the buffer (the field's clear button)
    Clear,
}

impl Action {
    /// Resolve a key's declared action
    pub fn for_key(key: &KeyDescriptor) -> Self {
        match key.action_name() {
            ActionName::Insert => Action::Insert(key.insert_text()),
            ActionName::Delete => Action::Delete,
            ActionName::Submit => Action::Submit,
            ActionName::ToggleCaps => Action::ToggleCaps,
            ActionName::CursorLeft => Action::MoveCursor(-1),
            ActionName::CursorRight => Action::MoveCursor(1),
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Action::Insert(_))
    }
}
