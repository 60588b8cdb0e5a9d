//! Error types for rejected store actions.

/// Reasons an action leaves the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown design: {0}")]
    UnknownDesign(String),

    #[error("Unknown color region: {0}")]
    UnknownRegion(String),

    #[error("Unknown decoration: {0}")]
    UnknownDecoration(String),

    #[error("Decoration already exists: {0}")]
    DuplicateDecoration(String),

    #[error("Unknown cart item: {0}")]
    UnknownCartItem(String),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,
}
