//! Rendering/Input Adapter
//!
//! Builds the board and input field with `web-sys`, turns clicks and key
//! presses into engine actions, and mirrors the engine state back into the
//! field.

pub mod board;
pub mod keys;
pub mod widget;

pub use widget::VirtualKeyboard;
