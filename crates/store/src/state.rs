//! Store state slices and the reducer that advances them.

use tailor_ipc::{
    BaseDesign, CartLineItem, Catalog, ColorRegion, Decoration, Model, ProductType, StoreAction,
};

use crate::error::StoreError;

/// Cart contents and the save id of the item being edited, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    pub current_save_id: Option<String>,
}

impl CartState {
    pub fn item(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn add(&mut self, item: CartLineItem) {
        let existing = item.save_id.as_deref().and_then(|save_id| {
            self.items.iter().position(|existing| {
                existing.id == save_id || existing.save_id.as_deref() == Some(save_id)
            })
        });

        match existing {
            Some(index) => {
                let original_id = self.items[index].id.clone();
                self.items[index] = CartLineItem {
                    id: original_id.clone(),
                    save_id: Some(original_id),
                    ..item
                };
            }
            None => self.items.push(item),
        }
        self.current_save_id = None;
    }
}

/// Canonical application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignState {
    pub catalog: Catalog,
    pub product_type: ProductType,
    pub selected_model_id: Option<String>,
    pub selected_design_id: Option<String>,
    /// Region colors in document order
    pub colors: Vec<ColorRegion>,
    /// Decorations in insertion order
    pub decorations: Vec<Decoration>,
    pub selected_decoration: Option<String>,
    pub cart: CartState,
}

impl DesignState {
    /// Initial state with the default model and design of the default product type selected
    pub fn with_catalog(catalog: Catalog) -> Self {
        let mut state = Self {
            catalog,
            ..Default::default()
        };
        state.select_product_type(ProductType::default());
        state
    }

    pub fn selected_model(&self) -> Option<&Model> {
        self.selected_model_id
            .as_deref()
            .and_then(|id| self.catalog.model(id))
    }

    pub fn selected_design(&self) -> Option<&BaseDesign> {
        self.selected_design_id
            .as_deref()
            .and_then(|id| self.catalog.design(id))
    }

    pub fn decoration(&self, id: &str) -> Option<&Decoration> {
        self.decorations.iter().find(|d| d.id() == id)
    }

    pub fn has_decoration(&self, id: &str) -> bool {
        self.decoration(id).is_some()
    }

    pub fn region(&self, id: &str) -> Option<&ColorRegion> {
        self.colors.iter().find(|r| r.id == id)
    }

    fn select_product_type(&mut self, product_type: ProductType) {
        self.product_type = product_type;
        if let Some(design) = self.catalog.default_design(product_type) {
            self.selected_design_id = Some(design.id.clone());
        }
        if let Some(model) = self.catalog.default_model(product_type) {
            self.selected_model_id = Some(model.id.clone());
        }
    }

    /// Apply one action. On error the state is unchanged.
    pub fn reduce(&mut self, action: &StoreAction) -> Result<(), StoreError> {
        match action {
            StoreAction::SetRegionColors(regions) | StoreAction::LoadSavedColors(regions) => {
                self.colors = regions.clone();
            }
            StoreAction::UpdateRegionColor { id, fill } => {
                let region = self
                    .colors
                    .iter_mut()
                    .find(|r| r.id == *id)
                    .ok_or_else(|| StoreError::UnknownRegion(id.clone()))?;
                region.fill = fill.clone();
            }
            StoreAction::ClearColors => self.colors.clear(),

            StoreAction::AddDecoration(decoration) => {
                if self.has_decoration(decoration.id()) {
                    return Err(StoreError::DuplicateDecoration(decoration.id().to_string()));
                }
                self.selected_decoration = Some(decoration.id().to_string());
                self.decorations.push(decoration.clone());
            }
            StoreAction::UpdateDecoration { id, patch } => {
                let decoration = self
                    .decorations
                    .iter_mut()
                    .find(|d| d.id() == id)
                    .ok_or_else(|| StoreError::UnknownDecoration(id.clone()))?;
                decoration.apply_patch(patch);
            }
            StoreAction::RemoveDecoration { id } => {
                if !self.has_decoration(id) {
                    return Err(StoreError::UnknownDecoration(id.clone()));
                }
                self.decorations.retain(|d| d.id() != id);
                if self.selected_decoration.as_deref() == Some(id.as_str()) {
                    self.selected_decoration = None;
                }
            }
            StoreAction::SetSelectedDecoration { id } => {
                if let Some(id) = id {
                    if !self.has_decoration(id) {
                        return Err(StoreError::UnknownDecoration(id.clone()));
                    }
                }
                self.selected_decoration = id.clone();
            }
            StoreAction::LoadSavedDecorations(decorations) => {
                self.decorations = decorations.clone();
                self.selected_decoration = None;
            }
            StoreAction::ClearDecorations => {
                self.decorations.clear();
                self.selected_decoration = None;
            }

            StoreAction::SetSelectedModel { id } => {
                let model = self
                    .catalog
                    .model(id)
                    .ok_or_else(|| StoreError::UnknownModel(id.clone()))?;
                self.product_type = model.product_type;
                self.selected_model_id = Some(id.clone());
            }
            StoreAction::SetSelectedDesign { id } => {
                if self.catalog.design(id).is_none() {
                    return Err(StoreError::UnknownDesign(id.clone()));
                }
                self.selected_design_id = Some(id.clone());
            }
            StoreAction::LoadSavedDesign { id } => {
                let design = self
                    .catalog
                    .design(id)
                    .ok_or_else(|| StoreError::UnknownDesign(id.clone()))?;
                self.product_type = design.product_type;
                self.selected_design_id = Some(id.clone());
            }
            StoreAction::SetSelectedProductType(product_type) => {
                self.select_product_type(*product_type);
            }

            StoreAction::AddToCart(item) => self.cart.add(item.clone()),
            StoreAction::RemoveFromCart { id } => {
                if self.cart.item(id).is_none() {
                    return Err(StoreError::UnknownCartItem(id.clone()));
                }
                self.cart.items.retain(|item| item.id != *id);
                if self.cart.current_save_id.as_deref() == Some(id.as_str()) {
                    self.cart.current_save_id = None;
                }
            }
            StoreAction::SetCartQuantity { id, quantity } => {
                if *quantity == 0 {
                    return Err(StoreError::InvalidQuantity);
                }
                let item = self
                    .cart
                    .items
                    .iter_mut()
                    .find(|item| item.id == *id)
                    .ok_or_else(|| StoreError::UnknownCartItem(id.clone()))?;
                item.quantity = *quantity;
            }
            StoreAction::SetCurrentSaveId { id } => {
                self.cart.current_save_id = id.clone();
            }
        }
        Ok(())
    }
}
