//! Construction-time layout validation

use std::collections::HashSet;
use thiserror::Error;

use super::model::Layout;

/// Errors raised while loading a layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Malformed source, including unknown action names
    #[error("Layout parsing failed: {0}")]
    Parse(String),

    #[error("Failed to read layout file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Layout has no character sets")]
    Empty,

    #[error("Character set '{0}' has no rows")]
    EmptyCharacterSet(String),

    #[error("Row '{row}' in character set '{set}' has no keys")]
    EmptyRow { set: String, row: String },

    #[error("Duplicate character set '{0}'")]
    DuplicateCharacterSet(String),

    #[error("Duplicate row '{row}' in character set '{set}'")]
    DuplicateRow { set: String, row: String },
}

/// Check the structural rules a layout must satisfy before it is rendered
pub fn validate(layout: &Layout) -> Result<(), LayoutError> {
    if layout.sets.is_empty() {
        return Err(LayoutError::Empty);
    }

    let mut set_names = HashSet::new();
    for set in &layout.sets {
        if !set_names.insert(set.name.as_str()) {
            return Err(LayoutError::DuplicateCharacterSet(set.name.clone()));
        }
        if set.rows.is_empty() {
            return Err(LayoutError::EmptyCharacterSet(set.name.clone()));
        }

        let mut row_names = HashSet::new();
        for row in &set.rows {
            if !row_names.insert(row.name.as_str()) {
                return Err(LayoutError::DuplicateRow {
                    set: set.name.clone(),
                    row: row.name.clone(),
                });
            }
            if row.keys.is_empty() {
                return Err(LayoutError::EmptyRow {
                    set: set.name.clone(),
                    row: row.name.clone(),
                });
            }
        }
    }

    log::debug!(
        "Validated layout: {} character sets, {} keys",
        layout.sets.len(),
        layout.keys().count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::key::KeyDescriptor;
    use crate::layout::model::{CharacterSet, Row};

    fn row(name: &str, labels: &[&str]) -> Row {
        Row {
            name: name.to_string(),
            keys: labels.iter().map(|l| KeyDescriptor::character(l)).collect(),
        }
    }

    #[test]
    fn test_empty_layout_rejected() {
        assert_eq!(validate(&Layout::default()), Err(LayoutError::Empty));
    }

    #[test]
    fn test_empty_row_rejected() {
        let layout = Layout::new(vec![CharacterSet {
            name: "numeric".to_string(),
            rows: vec![row("row1", &["1"]), row("row2", &[])],
        }]);
        assert_eq!(
            validate(&layout),
            Err(LayoutError::EmptyRow {
                set: "numeric".to_string(),
                row: "row2".to_string()
            })
        );
    }

    #[test]
    fn test_empty_set_rejected() {
        let layout = Layout::new(vec![CharacterSet {
            name: "numeric".to_string(),
            rows: vec![],
        }]);
        assert_eq!(
            validate(&layout),
            Err(LayoutError::EmptyCharacterSet("numeric".to_string()))
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Layout::from_json(r#"{"a": {"r": [{"value": "1"}]}, "a": {"r": [{"value": "2"}]}}"#)
            .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateCharacterSet("a".to_string()));

        let err = Layout::from_json(r#"{"a": {"r": [{"value": "1"}], "r": [{"value": "2"}]}}"#)
            .unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateRow { .. }));
    }

    #[test]
    fn test_unknown_action_is_parse_error() {
        let err = Layout::from_yaml("a:\n  r:\n    - { value: x, onclick: launch }\n").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }
}
