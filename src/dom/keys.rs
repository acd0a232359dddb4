//! Physical key routing
//!
//! Every keydown on the field is either turned into an engine action,
//! blocked, or left to the browser. Anything the browser would do to the
//! field's text or caret must not be left to it.

use crate::config::accepts_physical_key;
use crate::engine::Action;

/// Modifier keys held during a keydown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl or Meta
    pub command: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRoute {
    /// Leave the event to the browser
    Pass,
    /// Cancel the event and do nothing
    Block,
    /// Cancel the event and run the action
    Dispatch(Action),
}

/// Keys that edit the field or move its caret with no engine counterpart
const BLOCKED_KEYS: &[&str] = &[
    "Delete", "ArrowUp", "ArrowDown", "PageUp", "PageDown", "Cut", "Paste", "Undo", "Redo",
    "Clear",
];

/// Command chords that edit the field: paste, cut, undo, redo
const BLOCKED_CHORDS: &[&str] = &["v", "x", "z", "y"];

pub fn route_key(key: &str, modifiers: Modifiers) -> KeyRoute {
    let single_char = key.chars().count() == 1;

    if modifiers.command {
        // Copy and select-all leave the text alone; the select event resyncs the caret
        return if single_char && BLOCKED_CHORDS.contains(&key.to_lowercase().as_str()) {
            KeyRoute::Block
        } else {
            KeyRoute::Pass
        };
    }
    if modifiers.alt {
        // Option chords type characters on some platforms
        return if single_char { KeyRoute::Block } else { KeyRoute::Pass };
    }

    match key {
        "Backspace" => KeyRoute::Dispatch(Action::Delete),
        "ArrowLeft" => KeyRoute::Dispatch(Action::MoveCursor(-1)),
        "ArrowRight" => KeyRoute::Dispatch(Action::MoveCursor(1)),
        "Home" => KeyRoute::Dispatch(Action::MoveCursor(isize::MIN)),
        "End" => KeyRoute::Dispatch(Action::MoveCursor(isize::MAX)),
        _ if BLOCKED_KEYS.contains(&key) => KeyRoute::Block,
        _ if single_char => {
            if accepts_physical_key(key) {
                KeyRoute::Dispatch(Action::Insert(key.to_string()))
            } else {
                log::debug!("keydown: rejected {:?}", key);
                KeyRoute::Block
            }
        }
        _ => KeyRoute::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: &str) -> KeyRoute {
        route_key(key, Modifiers::default())
    }

    fn command(key: &str) -> KeyRoute {
        route_key(
            key,
            Modifiers {
                command: true,
                ..Modifiers::default()
            },
        )
    }

    #[test]
    fn test_editing_keys_dispatch() {
        assert_eq!(plain("Backspace"), KeyRoute::Dispatch(Action::Delete));
        assert_eq!(plain("a"), KeyRoute::Dispatch(Action::Insert("a".to_string())));
        assert_eq!(plain(" "), KeyRoute::Dispatch(Action::Insert(" ".to_string())));
    }

    #[test]
    fn test_caret_keys_move_the_engine_cursor() {
        assert_eq!(plain("ArrowLeft"), KeyRoute::Dispatch(Action::MoveCursor(-1)));
        assert_eq!(plain("ArrowRight"), KeyRoute::Dispatch(Action::MoveCursor(1)));
        assert_eq!(plain("Home"), KeyRoute::Dispatch(Action::MoveCursor(isize::MIN)));
        assert_eq!(plain("End"), KeyRoute::Dispatch(Action::MoveCursor(isize::MAX)));
    }

    #[test]
    fn test_keys_without_an_action_are_blocked() {
        for key in ["Delete", "ArrowUp", "ArrowDown", "PageUp", "PageDown"] {
            assert_eq!(plain(key), KeyRoute::Block, "{}", key);
        }
        assert_eq!(plain("%"), KeyRoute::Block);
    }

    #[test]
    fn test_non_editing_keys_pass() {
        for key in ["Tab", "Shift", "Escape", "F5", "Enter"] {
            assert_eq!(plain(key), KeyRoute::Pass, "{}", key);
        }
    }

    #[test]
    fn test_command_chords() {
        assert_eq!(command("v"), KeyRoute::Block);
        assert_eq!(command("X"), KeyRoute::Block);
        assert_eq!(command("z"), KeyRoute::Block);
        assert_eq!(command("c"), KeyRoute::Pass);
        assert_eq!(command("a"), KeyRoute::Pass);
        assert_eq!(command("ArrowLeft"), KeyRoute::Pass);
    }

    #[test]
    fn test_alt_characters_are_blocked() {
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };
        assert_eq!(route_key("e", alt), KeyRoute::Block);
        assert_eq!(route_key("ArrowLeft", alt), KeyRoute::Pass);
    }
}
