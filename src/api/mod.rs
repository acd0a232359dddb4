//! Keyboard WASM API
//!
//! Free functions for working with layouts from JavaScript. The widget
//! itself is `dom::VirtualKeyboard`.

pub mod helpers;

use wasm_bindgen::prelude::*;

use crate::error::KeyboardError;
use crate::layout::{validate, Layout};
use helpers::{deserialize, serialize};

/// The built-in layout as a plain object
#[wasm_bindgen(js_name = basicLayout)]
pub fn basic_layout() -> Result<JsValue, JsValue> {
    serialize(&Layout::basic(), "Failed to serialize layout")
}

/// Validate a layout object, returning it in normalized form
#[wasm_bindgen(js_name = validateLayout)]
pub fn validate_layout(layout: JsValue) -> Result<JsValue, JsValue> {
    let layout: Layout = deserialize(layout, "Invalid layout")?;
    validate(&layout).map_err(KeyboardError::from)?;
    serialize(&layout, "Failed to serialize layout")
}

/// Parse a YAML layout document into a layout object
#[wasm_bindgen(js_name = parseLayoutYaml)]
pub fn parse_layout_yaml(source: &str) -> Result<JsValue, JsValue> {
    let layout = Layout::from_yaml(source).map_err(KeyboardError::from)?;
    serialize(&layout, "Failed to serialize layout")
}
