//! Layout model: character sets -> rows -> keys
//!
//! On the wire a layout is a map of character-set name to a map of row name
//! to a list of keys. Map order is the render order, so both levels are
//! stored as ordered vectors rather than hash maps.

use once_cell::sync::Lazy;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use super::key::KeyDescriptor;
use super::validate::{validate, LayoutError};

const BASIC_LAYOUT_YAML: &str = include_str!("basic.yaml");

static BASIC_LAYOUT: Lazy<Layout> =
    Lazy::new(|| Layout::from_yaml(BASIC_LAYOUT_YAML).expect("built-in layout is valid"));

/// Stable address of a key inside a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId {
    pub set: usize,
    pub row: usize,
    pub index: usize,
}

impl KeyId {
    pub fn new(set: usize, row: usize, index: usize) -> Self {
        Self { set, row, index }
    }
}

/// A named row of keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub keys: Vec<KeyDescriptor>,
}

/// A named group of rows rendered together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// The full keyboard description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    pub sets: Vec<CharacterSet>,
}

impl Layout {
    pub fn new(sets: Vec<CharacterSet>) -> Self {
        Self { sets }
    }

    /// Built-in layout with an uppercase alphabetic set and a numeric set
    ///
    /// Parsed and validated once; each call hands out a copy.
    pub fn basic() -> Self {
        BASIC_LAYOUT.clone()
    }

    /// Parse and validate a YAML layout
    pub fn from_yaml(source: &str) -> Result<Self, LayoutError> {
        let layout: Layout =
            serde_yaml::from_str(source).map_err(|e| LayoutError::Parse(e.to_string()))?;
        validate(&layout)?;
        Ok(layout)
    }

    /// Parse and validate a JSON layout
    pub fn from_json(source: &str) -> Result<Self, LayoutError> {
        let layout: Layout =
            serde_json::from_str(source).map_err(|e| LayoutError::Parse(e.to_string()))?;
        validate(&layout)?;
        Ok(layout)
    }

    /// Load a YAML (or JSON, which YAML accepts) layout file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| LayoutError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&source)
    }

    pub fn character_set(&self, name: &str) -> Option<&CharacterSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|set| set.name.as_str())
    }

    pub fn key(&self, id: &KeyId) -> Option<&KeyDescriptor> {
        self.sets
            .get(id.set)
            .and_then(|set| set.rows.get(id.row))
            .and_then(|row| row.keys.get(id.index))
    }

    /// All keys in render order
    pub fn keys(&self) -> impl Iterator<Item = (KeyId, &KeyDescriptor)> {
        self.sets.iter().enumerate().flat_map(|(set_idx, set)| {
            set.rows.iter().enumerate().flat_map(move |(row_idx, row)| {
                row.keys
                    .iter()
                    .enumerate()
                    .map(move |(idx, key)| (KeyId::new(set_idx, row_idx, idx), key))
            })
        })
    }
}

// ============================================================================
// Serde: ordered maps
// ============================================================================

/// Map entries in document order, duplicates kept for validation
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sets = OrderedEntries::<OrderedEntries<Vec<KeyDescriptor>>>::deserialize(deserializer)?;
        let sets = sets
            .0
            .into_iter()
            .map(|(name, rows)| CharacterSet {
                name,
                rows: rows
                    .0
                    .into_iter()
                    .map(|(name, keys)| Row { name, keys })
                    .collect(),
            })
            .collect();
        Ok(Layout { sets })
    }
}

struct RowsRef<'a>(&'a [Row]);

impl Serialize for RowsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for row in self.0 {
            map.serialize_entry(&row.name, &row.keys)?;
        }
        map.end()
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sets.len()))?;
        for set in &self.sets {
            map.serialize_entry(&set.name, &RowsRef(&set.rows))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::key::ActionName;

    #[test]
    fn test_basic_layout_has_two_sets() {
        let layout = Layout::basic();
        let names: Vec<&str> = layout.set_names().collect();
        assert_eq!(names, vec!["uppercase", "numeric"]);

        let uppercase = layout.character_set("uppercase").unwrap();
        let row_names: Vec<&str> = uppercase.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(row_names, vec!["row1", "row2", "row3", "row4"]);
        assert_eq!(uppercase.rows[0].keys.len(), 11);
    }

    #[test]
    fn test_basic_layout_copies_are_independent() {
        let mut first = Layout::basic();
        first.sets.clear();
        assert_eq!(Layout::basic().sets.len(), 2);
        assert_eq!(Layout::basic(), Layout::from_yaml(BASIC_LAYOUT_YAML).unwrap());
    }

    #[test]
    fn test_map_order_is_document_order() {
        let layout = Layout::from_json(
            r#"{"zeta": {"b": [{"value": "1"}], "a": [{"value": "2"}]}, "alpha": {"r": [{"value": "3"}]}}"#,
        )
        .unwrap();
        assert_eq!(layout.set_names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(layout.sets[0].rows[0].name, "b");
        assert_eq!(layout.sets[0].rows[1].name, "a");
    }

    #[test]
    fn test_keys_iterate_in_render_order() {
        let layout = Layout::basic();
        let (first_id, first) = layout.keys().next().unwrap();
        assert_eq!(first_id, KeyId::new(0, 0, 0));
        assert_eq!(first.label, "Q");

        let (last_id, last) = layout.keys().last().unwrap();
        assert_eq!(last_id, KeyId::new(1, 3, 2));
        assert_eq!(last.action_name(), ActionName::CursorRight);
    }

    #[test]
    fn test_key_lookup() {
        let layout = Layout::basic();
        let caps = layout.key(&KeyId::new(0, 2, 0)).unwrap();
        assert_eq!(caps.action_name(), ActionName::ToggleCaps);
        assert_eq!(caps.style_tag.as_deref(), Some("caps"));
        assert!(layout.key(&KeyId::new(5, 0, 0)).is_none());
    }

    #[test]
    fn test_serialize_round_trips_structure() {
        let layout = Layout::basic();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(Layout::from_json(&json).unwrap(), layout);
    }
}
