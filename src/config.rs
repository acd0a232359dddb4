//! Keyboard options
//!
//! Deserialized from the object passed to the `VirtualKeyboard` constructor;
//! every field has a default, so `{}` is a valid configuration.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::engine::CapsState;
use crate::layout::{validate, Layout, LayoutError};

static PHYSICAL_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ A-Za-z0-9_@./#&+\-]*$").unwrap());

/// Whether a character typed on a physical keyboard is routed into the engine
pub fn accepts_physical_key(text: &str) -> bool {
    PHYSICAL_KEY.is_match(text)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyboardOptions {
    /// Id of the element the text input is appended to
    pub input_container: String,
    /// Id of the element the board is appended to
    pub board_container: String,
    /// Custom layout; the built-in layout when absent
    pub layout: Option<Layout>,
    pub placeholder: String,
    pub input_name: String,
    pub max_length: u32,
    /// Initial casing of alphabetic keys
    pub caps_lock: bool,
    pub initial_text: String,
}

impl Default for KeyboardOptions {
    fn default() -> Self {
        Self {
            input_container: "keyboard-input".to_string(),
            board_container: "keyboard-board".to_string(),
            layout: None,
            placeholder: "Type something...".to_string(),
            input_name: "test_input".to_string(),
            max_length: 80,
            caps_lock: true,
            initial_text: String::new(),
        }
    }
}

impl KeyboardOptions {
    /// The validated layout to render
    pub fn resolve_layout(&self) -> Result<Layout, LayoutError> {
        match &self.layout {
            Some(layout) => {
                validate(layout)?;
                Ok(layout.clone())
            }
            None => Ok(Layout::basic()),
        }
    }

    pub fn caps(&self) -> CapsState {
        CapsState::new(self.caps_lock)
    }
}
