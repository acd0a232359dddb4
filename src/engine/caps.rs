//! Caps state and key re-binding
//!
//! Rebindings are derived from the layout's declared labels rather than from
//! whatever is currently shown, so toggling twice restores the original set.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::layout::{ActionName, KeyId, Layout};

static ALPHABETIC_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// Whether a label takes part in case toggling
pub fn is_alphabetic_label(label: &str) -> bool {
    ALPHABETIC_LABEL.is_match(label)
}

/// Upper/lower casing of alphabetic keys, owned by one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapsState {
    upper: bool,
}

impl CapsState {
    pub fn new(upper: bool) -> Self {
        Self { upper }
    }

    pub fn is_upper(&self) -> bool {
        self.upper
    }

    pub fn toggle(&mut self) {
        self.upper = !self.upper;
    }

    /// Apply this casing to a label
    pub fn apply(&self, label: &str) -> String {
        if self.upper {
            label.to_uppercase()
        } else {
            label.to_lowercase()
        }
    }
}

impl Default for CapsState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// New label and insert action for one alphabetic key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRebinding {
    pub key: KeyId,
    pub label: String,
    pub action: Action,
}

/// Result of a caps toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsToggle {
    pub caps_lock: bool,
    pub rebindings: Vec<KeyRebinding>,
}

/// Rebindings for every alphabetic insert key under the given casing
pub fn rebindings(layout: &Layout, caps: CapsState) -> Vec<KeyRebinding> {
    layout
        .keys()
        .filter(|(_, key)| key.action_name() == ActionName::Insert && is_alphabetic_label(&key.label))
        .map(|(id, key)| {
            let label = caps.apply(&key.label);
            KeyRebinding {
                key: id,
                action: Action::Insert(label.clone()),
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabetic_label() {
        assert!(is_alphabetic_label("Q"));
        assert!(is_alphabetic_label("GO"));
        assert!(!is_alphabetic_label("_"));
        assert!(!is_alphabetic_label("["));
        assert!(!is_alphabetic_label("7"));
        assert!(!is_alphabetic_label("<i class='icon-caps'></i>"));
        assert!(!is_alphabetic_label(""));
    }

    #[test]
    fn test_toggle_flips() {
        let mut caps = CapsState::default();
        assert!(caps.is_upper());
        caps.toggle();
        assert!(!caps.is_upper());
        assert_eq!(caps.apply("Q"), "q");
    }

    #[test]
    fn test_rebindings_skip_action_and_symbol_keys() {
        let layout = Layout::basic();
        let bindings = rebindings(&layout, CapsState::new(false));

        assert_eq!(bindings.len(), 26);
        assert!(bindings.iter().all(|b| b.label.chars().all(|c| c.is_ascii_lowercase())));
        assert!(!bindings.iter().any(|b| b.label == "go"));
        assert_eq!(bindings[0].key, KeyId::new(0, 0, 0));
        assert_eq!(bindings[0].action, Action::Insert("q".to_string()));
    }
}
