//! Tailor - interactive garment customizer core
//!
//! Combines the design store, the 2D editing surface, and the 3D viewport
//! into one [`Customizer`] that an embedding UI shell drives.

pub mod cart;
pub mod coordinator;
pub mod customizer;
pub mod error;
pub mod logging;

pub use coordinator::{LifecycleCoordinator, SyncReport};
pub use customizer::Customizer;
pub use error::CustomizerError;
pub use logging::init_logging;

pub use tailor_config as config;
pub use tailor_ipc as ipc;
pub use tailor_store as store;
pub use tailor_surface as surface;
pub use tailor_viewport as viewport;
