use serde::{Deserialize, Serialize};

use super::catalog::BaseDesign;
use super::decoration::{ColorRegion, Decoration};
use super::document::SceneDocument;
use crate::error::IpcError;

/// A saved configuration in the cart.
///
/// Immutable once created except for `quantity` and removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: String,
    /// Id of the item this save replaces, when editing from the cart
    pub save_id: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub design: BaseDesign,
    pub model_path: String,
    pub path_colors: Vec<ColorRegion>,
    pub decorations: Vec<Decoration>,
    /// PNG data URI of the 3D preview
    pub preview: String,
    /// Serialized [`SceneDocument`]
    pub vector_data: String,
    pub quantity: u32,
}

impl CartLineItem {
    /// Parse the embedded scene document
    pub fn scene_document(&self) -> Result<SceneDocument, IpcError> {
        if self.vector_data.is_empty() {
            return Err(IpcError::InvalidFormat("empty vector data".into()));
        }
        SceneDocument::from_json(&self.vector_data)
    }

    pub fn line_total(&self) -> f64 {
        self.design.price * f64::from(self.quantity)
    }
}
