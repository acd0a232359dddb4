//! Error types for keyboard construction
//!
//! Editing itself never fails; only building a keyboard (layout loading,
//! options decoding, DOM setup) can.

use thiserror::Error;

use crate::layout::LayoutError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyboardError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Invalid keyboard options: {0}")]
    Options(String),

    /// A container element named in the options does not exist
    #[error("Element '#{0}' not found")]
    MissingElement(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<KeyboardError> for wasm_bindgen::JsValue {
    fn from(err: KeyboardError) -> Self {
        log::error!("{}", err);
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
