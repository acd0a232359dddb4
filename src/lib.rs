//! On-screen Virtual Keyboard WASM Module
//!
//! Renders a keyboard from a declarative layout and routes key presses into
//! a bound text field. The editing core (`engine`) and the layout model are
//! plain Rust and work without a browser; `dom` is the web-sys adapter.

pub mod api;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod keyboard;
pub mod layout;
pub mod text;

// Re-export commonly used types
pub use config::KeyboardOptions;
pub use dom::VirtualKeyboard;
pub use engine::{Action, CapsState, CapsToggle, EditingEngine, Effect, EngineState, KeyRebinding};
pub use error::KeyboardError;
pub use keyboard::{Binding, Keyboard};
pub use layout::{ActionName, KeyDescriptor, KeyId, Layout, LayoutError};
pub use text::{Selection, TextBuffer};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();
    log::info!("Virtual keyboard WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
