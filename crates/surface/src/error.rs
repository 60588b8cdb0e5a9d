//! Error types for editing surface content.

/// Errors raised while loading or constructing surface content.
///
/// Public surface operations log these and leave the scene unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to read asset {path}: {reason}")]
    Asset { path: String, reason: String },

    #[error("Failed to parse design document: {0}")]
    Svg(#[from] usvg::Error),

    #[error("Design document has no drawable elements")]
    EmptyDesign,

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid data URI: {0}")]
    DataUri(String),

    #[error("Invalid font {family}")]
    Font { family: String },

    #[error("Invalid decoration properties: {0}")]
    InvalidProperties(#[from] crate::validation::ValidationError),

    #[error("Surface of {width}x{height} cannot be allocated")]
    Allocation { width: u32, height: u32 },

    #[error("Image decode task failed: {0}")]
    Task(String),
}
