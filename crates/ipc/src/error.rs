//! Error types for the shared data contract.

/// Errors that can occur while encoding or decoding shared documents.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported scene document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
