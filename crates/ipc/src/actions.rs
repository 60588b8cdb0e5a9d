//! Store actions dispatched by the customizer components.

use serde::{Deserialize, Serialize};

use crate::types::{CartLineItem, ColorRegion, Decoration, DecorationPatch, ProductType};

/// Every state transition of the design store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum StoreAction {
    // ------------------------------------------------------------------
    // Colors
    // ------------------------------------------------------------------
    /// Replace the region list derived from a freshly loaded design
    SetRegionColors(Vec<ColorRegion>),

    /// Recolor one region
    UpdateRegionColor { id: String, fill: String },

    /// Restore regions from a cart item
    LoadSavedColors(Vec<ColorRegion>),

    ClearColors,

    // ------------------------------------------------------------------
    // Decorations
    // ------------------------------------------------------------------
    /// Append a decoration and select it
    AddDecoration(Decoration),

    /// Merge a settled snapshot into an existing decoration
    UpdateDecoration { id: String, patch: DecorationPatch },

    RemoveDecoration { id: String },

    SetSelectedDecoration { id: Option<String> },

    /// Replace every decoration with a cart item's list
    LoadSavedDecorations(Vec<Decoration>),

    ClearDecorations,

    // ------------------------------------------------------------------
    // Catalog selection
    // ------------------------------------------------------------------
    SetSelectedModel { id: String },

    SetSelectedDesign { id: String },

    /// Select a design from a cart item, adopting its product type
    LoadSavedDesign { id: String },

    /// Switch product type and select its default model and design
    SetSelectedProductType(ProductType),

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------
    /// Append, or replace the item matching the line item's save id
    AddToCart(CartLineItem),

    RemoveFromCart { id: String },

    SetCartQuantity { id: String, quantity: u32 },

    SetCurrentSaveId { id: Option<String> },
}

impl StoreAction {
    /// Wire name of the action
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::SetRegionColors(_) => "setRegionColors",
            StoreAction::UpdateRegionColor { .. } => "updateRegionColor",
            StoreAction::LoadSavedColors(_) => "loadSavedColors",
            StoreAction::ClearColors => "clearColors",
            StoreAction::AddDecoration(_) => "addDecoration",
            StoreAction::UpdateDecoration { .. } => "updateDecoration",
            StoreAction::RemoveDecoration { .. } => "removeDecoration",
            StoreAction::SetSelectedDecoration { .. } => "setSelectedDecoration",
            StoreAction::LoadSavedDecorations(_) => "loadSavedDecorations",
            StoreAction::ClearDecorations => "clearDecorations",
            StoreAction::SetSelectedModel { .. } => "setSelectedModel",
            StoreAction::SetSelectedDesign { .. } => "setSelectedDesign",
            StoreAction::LoadSavedDesign { .. } => "loadSavedDesign",
            StoreAction::SetSelectedProductType(_) => "setSelectedProductType",
            StoreAction::AddToCart(_) => "addToCart",
            StoreAction::RemoveFromCart { .. } => "removeFromCart",
            StoreAction::SetCartQuantity { .. } => "setCartQuantity",
            StoreAction::SetCurrentSaveId { .. } => "setCurrentSaveId",
        }
    }
}
