//! Normalized design store for Tailor
//!
//! Canonical state for the selected model, product type and design, the
//! per-region colors, the decoration list with its selection, and the cart.
//! Components share one [`StoreHandle`] and change state only by
//! dispatching [`tailor_ipc::StoreAction`]s.

pub mod error;
pub mod handle;
pub mod state;

pub use error::*;
pub use handle::*;
pub use state::*;
