//! Declarative key descriptors
//!
//! A key is pure data: what it shows, how it is styled, and which action it
//! names. Binding a key to an engine operation happens in `engine::action`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Operation a key can name in a layout file
///
/// Absent means `Insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionName {
    #[default]
    Insert,
    #[serde(alias = "del")]
    Delete,
    Submit,
    ToggleCaps,
    CursorLeft,
    CursorRight,
}

/// A single button descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDescriptor {
    /// Display label; may carry markup for icon buttons
    #[serde(alias = "value")]
    pub label: String,

    /// Extra CSS class for the button
    #[serde(default, alias = "buttonClass", skip_serializing_if = "Option::is_none")]
    pub style_tag: Option<String>,

    #[serde(default, alias = "onclick", skip_serializing_if = "Option::is_none")]
    pub action_name: Option<ActionName>,
}

impl KeyDescriptor {
    /// A plain character key
    pub fn character(label: &str) -> Self {
        Self {
            label: label.to_string(),
            style_tag: None,
            action_name: None,
        }
    }

    /// A key bound to a named action
    pub fn action(label: &str, action_name: ActionName) -> Self {
        Self {
            label: label.to_string(),
            style_tag: None,
            action_name: Some(action_name),
        }
    }

    pub fn with_style(mut self, style_tag: &str) -> Self {
        self.style_tag = Some(style_tag.to_string());
        self
    }

    /// The declared action, defaulting to insert
    pub fn action_name(&self) -> ActionName {
        self.action_name.unwrap_or_default()
    }

    /// Text the key inserts: the label as rendered, without markup
    pub fn insert_text(&self) -> String {
        decode_entities(&MARKUP_TAG.replace_all(&self.label, ""))
    }
}

/// Decode the handful of HTML entities that show up in key labels
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
