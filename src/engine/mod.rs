//! Editing Engine
//!
//! Owns the buffer, cursor, selection and caps state, and exposes the closed
//! set of editing operations the adapter can invoke.
//!
//! ## Modules
//!
//! - `action`: The `Action` enum and binding from layout keys
//! - `caps`: Caps state and the rebinding list it produces
//! - `core`: `EditingEngine` itself

pub mod action;
pub mod caps;
pub mod core;

pub use action::Action;
pub use caps::{is_alphabetic_label, CapsState, CapsToggle, KeyRebinding};
pub use self::core::{EditingEngine, Effect, EngineState};
