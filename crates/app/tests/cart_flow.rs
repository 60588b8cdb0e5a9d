//! Saving designs to the cart and restoring them for editing

mod common;

use common::*;
use glam::Vec2;
use tailor::ipc::{DecorationPatch, SceneDocument};

#[tokio::test]
async fn test_add_to_cart_snapshots_design() {
    let mut customizer = customizer_with_quad();
    customizer.add_text(None);
    customizer.frame();

    let id = customizer.add_to_cart(2).await.unwrap();
    let item = customizer
        .store()
        .read(|s| s.cart.item(&id).cloned())
        .unwrap();

    assert_eq!(item.quantity, 2);
    assert_eq!(item.design.id, "bands");
    assert_eq!(item.model_path, "/models/jersey.glb");
    assert_eq!(item.path_colors.len(), 3);
    assert_eq!(item.decorations.len(), 1);
    assert!(item.preview.starts_with("data:image/png;base64,"));

    let document = item.scene_document().unwrap();
    assert!(document.objects[0].is_background());
    assert_eq!(document.decorations().count(), 1);
}

#[tokio::test]
async fn test_cart_without_mesh_has_empty_preview() {
    let mut customizer = customizer();
    let id = customizer.add_to_cart(1).await.unwrap();
    let preview = customizer
        .store()
        .read(|s| s.cart.item(&id).map(|item| item.preview.clone()));
    assert_eq!(preview.as_deref(), Some(""));
}

#[tokio::test]
async fn test_rehydration_keeps_ids_and_colors() {
    let mut customizer = customizer_with_quad();
    customizer.add_text(None);
    customizer.frame();
    customizer.update_selected(DecorationPatch {
        text: Some("Seven".into()),
        ..Default::default()
    });
    customizer.recolor_region("path-1", "#abcdef").unwrap();
    customizer.frame();
    let saved = customizer.engine().decorations();

    let id = customizer.add_to_cart(1).await.unwrap();

    customizer.delete_selected();
    customizer.recolor_region("path-1", "#000000").unwrap();
    customizer.frame();
    assert!(customizer.store().read(|s| s.decorations.is_empty()));

    assert_eq!(customizer.edit_cart_item(&id).unwrap(), 1);

    assert_eq!(customizer.engine().decorations(), saved);
    assert_eq!(customizer.store().read(|s| s.decorations.clone()), saved);
    assert_eq!(
        customizer.store().read(|s| s.cart.current_save_id.clone()),
        Some(id)
    );
    assert_eq!(
        customizer.store().read(|s| s.colors[1].fill.clone()),
        "#abcdef"
    );
    assert_eq!(
        customizer.texture().get_pixel(250, 250),
        Some([0xab, 0xcd, 0xef, 255])
    );
}

#[tokio::test]
async fn test_resave_replaces_edited_item() {
    let mut customizer = customizer_with_quad();
    customizer.add_text(None);
    customizer.frame();
    let id = customizer.add_to_cart(3).await.unwrap();

    customizer.edit_cart_item(&id).unwrap();
    customizer.add_text(Some(Vec2::new(0.6, 0.6)));
    customizer.frame();
    let resaved = customizer.add_to_cart(3).await.unwrap();

    assert_eq!(resaved, id);
    let (count, decorations, save_id) = customizer.store().read(|s| {
        (
            s.cart.items.len(),
            s.cart.items[0].decorations.len(),
            s.cart.current_save_id.clone(),
        )
    });
    assert_eq!(count, 1);
    assert_eq!(decorations, 2);
    assert_eq!(save_id, None);
}

#[tokio::test]
async fn test_edit_replaces_current_decorations() {
    let mut customizer = customizer();
    customizer.add_text(None);
    customizer.frame();
    let id = customizer.add_to_cart(1).await.unwrap();

    customizer.add_text(Some(Vec2::new(0.5, 0.5)));
    customizer.add_text(Some(Vec2::new(0.7, 0.7)));
    customizer.frame();
    assert_eq!(customizer.engine().decorations().len(), 3);

    customizer.edit_cart_item(&id).unwrap();
    assert_eq!(customizer.engine().decorations().len(), 1);
    assert_eq!(customizer.store().read(|s| s.decorations.len()), 1);
}

#[test]
fn test_document_json_reproduces_decorations() {
    let mut customizer = customizer();
    customizer.add_text(None);
    customizer.add_text(Some(Vec2::new(0.4, 0.7)));
    customizer.frame();

    let json = customizer.engine().to_document().to_json().unwrap();
    let document = SceneDocument::from_json(&json).unwrap();
    assert_eq!(
        document.decorations().collect::<Vec<_>>(),
        customizer.engine().decorations()
    );
}

#[tokio::test]
async fn test_capture_restores_camera_pose() {
    let mut customizer = customizer_with_quad();
    customizer.orbit(Vec2::new(120.0, 30.0));
    customizer.zoom(2.0);
    let before = customizer.viewport().camera().pose();

    let uri = customizer.capture_screenshot().await.unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(customizer.viewport().camera().pose(), before);
}

#[tokio::test]
async fn test_capture_with_text_and_image() {
    let mut customizer = customizer_with_quad();
    customizer.add_text(Some(Vec2::splat(0.5)));
    customizer
        .add_image(png(16, 16, [200, 40, 40, 255]), Some(Vec2::new(0.25, 0.25)))
        .await
        .unwrap();
    customizer.frame();
    customizer.orbit(Vec2::new(-60.0, 15.0));
    let before = customizer.viewport().camera().pose();
    let decorations = customizer.engine().decorations();

    let uri = customizer.capture_screenshot().await.unwrap();

    assert!(uri.starts_with("data:image/png;base64,"));
    assert!(uri.len() > "data:image/png;base64,".len());
    assert_eq!(customizer.viewport().camera().pose(), before);
    assert_eq!(customizer.engine().decorations(), decorations);
    assert_eq!(customizer.store().read(|s| s.decorations.len()), 2);
}

#[test]
fn test_cart_item_management() {
    let mut customizer = customizer();
    assert!(customizer.set_cart_quantity("missing", 2).is_err());
    assert!(customizer.remove_cart_item("missing").is_err());
    assert!(customizer.edit_cart_item("missing").is_err());
}

#[tokio::test]
async fn test_quantity_and_removal() {
    let mut customizer = customizer();
    let id = customizer.add_to_cart(1).await.unwrap();

    customizer.set_cart_quantity(&id, 4).unwrap();
    assert!(customizer.set_cart_quantity(&id, 0).is_err());
    let total = customizer
        .store()
        .read(|s| s.cart.item(&id).map(|item| item.line_total()));
    assert_eq!(total, Some(236.0));

    customizer.remove_cart_item(&id).unwrap();
    assert!(customizer.store().read(|s| s.cart.items.is_empty()));
}
