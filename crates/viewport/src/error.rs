//! Error types for the 3D viewport.

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("No mesh loaded")]
    NoMesh,

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Viewport of {width}x{height} cannot be rendered")]
    EmptyViewport { width: u32, height: u32 },

    #[error("Failed to encode capture: {0}")]
    Encode(#[from] image::ImageError),
}
