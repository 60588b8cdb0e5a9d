//! Building cart line items from the current design

use std::time::{SystemTime, UNIX_EPOCH};

use tailor_ipc::{CartLineItem, SceneDocument};
use tailor_store::DesignState;
use uuid::Uuid;

use crate::error::CustomizerError;

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Snapshot the selected design, colors, and decorations into a line item.
///
/// The item carries the current save id, so adding it replaces the cart
/// entry being edited.
pub fn build_line_item(
    state: &DesignState,
    document: &SceneDocument,
    preview: String,
    quantity: u32,
    timestamp: u64,
) -> Result<CartLineItem, CustomizerError> {
    let design = state
        .selected_design()
        .ok_or(CustomizerError::NoDesignSelected)?;
    let model = state
        .selected_model()
        .ok_or(CustomizerError::NoModelSelected)?;

    Ok(CartLineItem {
        id: Uuid::new_v4().to_string(),
        save_id: state.cart.current_save_id.clone(),
        timestamp,
        design: design.clone(),
        model_path: model.path.clone(),
        path_colors: state.colors.clone(),
        decorations: state.decorations.clone(),
        preview,
        vector_data: document.to_json()?,
        quantity: quantity.max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailor_ipc::{BaseDesign, Catalog, ColorRegion, Model, ProductType};

    fn state() -> DesignState {
        DesignState::with_catalog(Catalog::new(
            vec![Model {
                id: "jersey".into(),
                name: "Jersey".into(),
                path: "/models/jersey.glb".into(),
                product_type: ProductType::Jersey,
                default_design_id: Some("stripes".into()),
                is_default: true,
            }],
            vec![BaseDesign {
                id: "stripes".into(),
                name: "Stripes".into(),
                path: "/designs/stripes.svg".into(),
                product_type: ProductType::Jersey,
                model_id: "jersey".into(),
                price: 49.5,
                is_default: true,
            }],
        ))
    }

    #[test]
    fn test_line_item_snapshots_state() {
        let mut state = state();
        state.colors = vec![ColorRegion::for_index(0, "#abcdef")];
        state.cart.current_save_id = Some("old".into());

        let item = build_line_item(&state, &SceneDocument::new(500, 500), "data:".into(), 2, 7)
            .unwrap();
        assert_eq!(item.save_id.as_deref(), Some("old"));
        assert_eq!(item.model_path, "/models/jersey.glb");
        assert_eq!(item.path_colors, state.colors);
        assert_eq!(item.timestamp, 7);
        assert_eq!(item.line_total(), 99.0);
        assert!(item.scene_document().is_ok());
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_line_item_needs_design() {
        let state = DesignState::default();
        let result = build_line_item(&state, &SceneDocument::new(1, 1), String::new(), 1, 0);
        assert!(matches!(result, Err(CustomizerError::NoDesignSelected)));
    }
}
