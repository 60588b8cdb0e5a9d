//! Shared data contract for Tailor
//!
//! Defines the catalog entries, decorations, color regions, store actions,
//! and persisted documents exchanged between the editing surface, the
//! viewport, the store, and the embedding UI shell.

pub mod actions;
pub mod error;
pub mod input;
pub mod types;

pub use actions::*;
pub use error::*;
pub use input::*;
pub use types::*;
