//! Tailor 3D viewport
//!
//! Shows the editing surface as a texture on the garment mesh and maps
//! pointer input on the model back to surface coordinates.

pub mod camera;
mod capture;
pub mod controls;
pub mod error;
pub mod mapper;
pub mod placement;
pub mod raycast;
pub mod render;
pub mod viewport;

pub use camera::{CameraPose, OrbitCamera};
pub use capture::encode_png_data_uri;
pub use controls::ControlLock;
pub use error::ViewportError;
pub use mapper::ViewRect;
pub use placement::ModelPlacement;
pub use raycast::{MeshData, MeshHit, Ray};
pub use viewport::{PointerOutcome, SurfacePointer, Viewport};
