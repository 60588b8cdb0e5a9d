//! Errors returned to the embedder.

use tailor_config::ConfigError;
use tailor_ipc::IpcError;
use tailor_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CustomizerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Store rejected action: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ipc(#[from] IpcError),

    #[error("No base design selected")]
    NoDesignSelected,

    #[error("No model selected")]
    NoModelSelected,

    #[error("Invalid color {0}, expected #rgb or #rrggbb")]
    InvalidColor(String),
}
