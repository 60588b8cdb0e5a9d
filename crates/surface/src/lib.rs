//! Tailor editing surface
//!
//! The 2D half of the customizer: a base design whose regions can be
//! recolored, text and image decorations that can be moved, scaled and
//! rotated, and a texture bridge that turns the scene into pixels for the
//! 3D viewport.

pub mod assets;
pub mod background;
pub mod color;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod gesture;
pub mod image_source;
pub mod object;
mod raster;
pub mod surface;
pub mod text;
pub mod texture;
pub mod tiles;
pub mod validation;

pub use assets::{AssetSource, FsAssets, MemoryAssets};
pub use background::BackgroundGroup;
pub use engine::{EditingSurface, ObjectUpdate};
pub use error::SurfaceError;
pub use events::SurfaceEvent;
pub use gesture::{GestureMode, GesturePhase};
pub use object::{ObjectContent, ObjectHandle, ObjectIdentity, SceneObject};
pub use surface::CpuSurface;
pub use text::FontBook;
pub use texture::{BridgeStats, TextureBridge};
pub use tiles::{TileCoord, TiledSurface};
