//! Layout Model
//!
//! Static description of the keyboard: character sets, their rows, and the
//! keys in each row. Read-only to the editing engine.

pub mod key;
pub mod model;
pub mod validate;

pub use key::{ActionName, KeyDescriptor};
pub use model::{CharacterSet, KeyId, Layout, Row};
pub use validate::{validate, LayoutError};
