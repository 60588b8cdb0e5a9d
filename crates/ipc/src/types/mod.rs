//! Type definitions shared across the customizer.

mod cart;
mod catalog;
mod decoration;
mod document;

pub use cart::*;
pub use catalog::*;
pub use decoration::*;
pub use document::*;
