//! Layer 0: Text Editor Core
//!
//! Pure text primitives with no knowledge of keys or layouts.
//!
//! ## Modules
//!
//! - `buffer`: Text storage and splice/remove operations
//! - `cursor`: Cursor clamping and selection spans (char offsets)
//! - `position`: Char offset <-> UTF-16 offset conversion for the DOM

pub mod buffer;
pub mod cursor;
pub mod position;

// Re-exports for convenience
pub use buffer::TextBuffer;
pub use cursor::{clamp_cursor, offset_cursor, Selection};
pub use position::{char_pos_to_utf16, utf16_to_char_pos};
