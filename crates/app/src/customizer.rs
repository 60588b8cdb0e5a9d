//! The customizer facade
//!
//! Wires the store, the editing surface, the texture bridge, and the 3D
//! viewport together. The embedding shell forwards input here and calls
//! [`Customizer::frame`] once per animation frame.

use std::path::Path;
use std::rc::Rc;

use glam::Vec2;
use image::RgbaImage;
use tailor_config::CustomizerConfig;
use tailor_ipc::{
    Catalog, DecorationPatch, PointerPhase, ProductType, StoreAction, View,
};
use tailor_store::{StoreError, StoreHandle};
use tailor_surface::color::parse_hex_color;
use tailor_surface::{
    AssetSource, BridgeStats, CpuSurface, EditingSurface, FontBook, FsAssets, GesturePhase,
    ObjectHandle, ObjectUpdate, TextureBridge,
};
use tailor_viewport::mapper::pixel_to_surface_uv;
use tailor_viewport::{
    ControlLock, MeshData, ModelPlacement, PointerOutcome, ViewRect, Viewport, ViewportError,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cart::{build_line_item, now_millis};
use crate::coordinator::{LifecycleCoordinator, SyncReport};
use crate::error::CustomizerError;

/// A decoration waiting for a click on the model
#[derive(Clone, PartialEq)]
enum PendingPlacement {
    Text,
    Image(Vec<u8>),
}

impl std::fmt::Debug for PendingPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingPlacement::Text => write!(f, "Text"),
            PendingPlacement::Image(bytes) => write!(f, "Image({} bytes)", bytes.len()),
        }
    }
}

pub struct Customizer {
    config: CustomizerConfig,
    store: StoreHandle,
    engine: EditingSurface,
    coordinator: LifecycleCoordinator,
    bridge: TextureBridge,
    viewport: Viewport,
    view: View,
    placement: Option<PendingPlacement>,
}

impl Customizer {
    /// Build every component and load the selected base design
    pub fn new(config: CustomizerConfig, catalog: Catalog, assets: Rc<dyn AssetSource>) -> Self {
        let store = StoreHandle::new(catalog);
        let fonts = FontBook::load(&config.assets, assets.as_ref());
        let mut engine = EditingSurface::new(config.surface.clone(), store.clone(), assets, fonts);
        let events = engine.subscribe().unwrap_or_else(|| {
            warn!("Surface events already taken");
            mpsc::unbounded_channel().1
        });
        let coordinator = LifecycleCoordinator::new(store.clone(), events);
        let bridge = TextureBridge::new(&config.surface);
        let viewport = Viewport::new(config.viewport.clone(), config.capture.clone());

        let mut customizer = Self {
            config,
            store,
            engine,
            coordinator,
            bridge,
            viewport,
            view: View::default(),
            placement: None,
        };
        customizer.load_selected_design();
        customizer.frame();
        info!("Customizer ready");
        customizer
    }

    /// Load the configuration file and read assets from disk
    pub fn load(config_path: impl AsRef<Path>, catalog: Catalog) -> Result<Self, CustomizerError> {
        let config = CustomizerConfig::load(config_path)?;
        let assets: Rc<dyn AssetSource> = Rc::new(FsAssets::new(config.assets.clone()));
        Ok(Self::new(config, catalog, assets))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &CustomizerConfig {
        &self.config
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn engine(&self) -> &EditingSurface {
        &self.engine
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The surface texture shown on the model
    pub fn texture(&self) -> &CpuSurface {
        self.bridge.texture()
    }

    pub fn bridge_stats(&self) -> BridgeStats {
        self.bridge.stats()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_placing(&self) -> bool {
        self.placement.is_some()
    }

    // ========================================================================
    // Catalog selection
    // ========================================================================

    pub fn select_product_type(&mut self, product_type: ProductType) {
        let previous = self.store.read(|s| s.product_type);
        self.store
            .dispatch(StoreAction::SetSelectedProductType(product_type));
        self.follow_product_type(previous);
        self.load_selected_design();
    }

    /// Reset the camera and re-place the mesh when the product type changed
    fn follow_product_type(&mut self, previous: ProductType) {
        let current = self.store.read(|s| s.product_type);
        if current == previous {
            return;
        }
        info!("Product type changed from {:?} to {:?}", previous, current);
        self.viewport.cancel_press();
        self.viewport.reset_camera();
        self.viewport.set_placement(ModelPlacement::for_product(current));
    }

    /// Select a model, switching to its default design when the current
    /// design belongs to another product type.
    pub fn select_model(&mut self, id: &str) -> Result<(), CustomizerError> {
        let previous = self.store.read(|s| s.product_type);
        self.store
            .try_dispatch(StoreAction::SetSelectedModel { id: id.to_string() })?;
        self.follow_product_type(previous);

        let replacement = self.store.read(|s| {
            let model = s.selected_model()?;
            let matches = s
                .selected_design()
                .is_some_and(|d| d.product_type == model.product_type);
            if matches {
                return None;
            }
            model
                .default_design_id
                .as_deref()
                .and_then(|id| s.catalog.design(id))
                .or_else(|| s.catalog.default_design(model.product_type))
                .map(|d| d.id.clone())
        });
        if let Some(design) = replacement {
            debug!("Model {} switches design to {}", id, design);
            self.store
                .try_dispatch(StoreAction::SetSelectedDesign { id: design })?;
            self.load_selected_design();
        }
        Ok(())
    }

    pub fn select_design(&mut self, id: &str) -> Result<(), CustomizerError> {
        self.store
            .try_dispatch(StoreAction::SetSelectedDesign { id: id.to_string() })?;
        self.load_selected_design();
        Ok(())
    }

    /// Load the selected design and put the store's decorations back on it
    fn load_selected_design(&mut self) {
        let Some(path) = self.store.read(|s| s.selected_design().map(|d| d.path.clone())) else {
            debug!("No base design selected");
            return;
        };
        // Persist a drag in flight before the scene is cleared
        self.engine.end_gesture();
        self.coordinator.sync(&mut self.engine);

        self.engine.load_base_design(&path);
        let decorations = self.store.read(|s| s.decorations.clone());
        let restored = decorations
            .iter()
            .filter(|d| self.engine.recreate_from_properties(d).is_some())
            .count();
        if restored > 0 {
            debug!("Restored {} decorations onto {}", restored, path);
        }
    }

    /// Install the mesh of the selected model, placed for its product type
    pub fn set_mesh(&mut self, mesh: MeshData) {
        let product_type = self.store.read(|s| s.product_type);
        self.viewport.set_mesh(mesh, product_type);
    }

    pub fn set_viewport_rect(&mut self, rect: ViewRect) {
        self.viewport.set_rect(rect);
    }

    // ========================================================================
    // Decorations
    // ========================================================================

    /// Add a text decoration at surface UV, or the default position
    pub fn add_text(&mut self, uv: Option<Vec2>) -> ObjectHandle {
        self.engine.add_text(uv)
    }

    pub async fn add_image(&mut self, bytes: Vec<u8>, uv: Option<Vec2>) -> Option<ObjectHandle> {
        self.engine.add_image(bytes, uv).await
    }

    /// Place a text decoration with the next click on the model
    pub fn begin_text_placement(&mut self) {
        self.placement = Some(PendingPlacement::Text);
        self.update_lock();
    }

    /// Place an uploaded image with the next click on the model
    pub fn begin_image_placement(&mut self, bytes: Vec<u8>) {
        self.placement = Some(PendingPlacement::Image(bytes));
        self.update_lock();
    }

    pub fn cancel_placement(&mut self) {
        if self.placement.take().is_some() {
            debug!("Placement cancelled");
            self.update_lock();
        }
    }

    /// Patch the selected decoration and persist it
    pub fn update_selected(&mut self, patch: DecorationPatch) {
        self.engine.update_object(ObjectUpdate::Patch(patch));
    }

    pub fn select_decoration(&mut self, id: &str) -> bool {
        self.engine.select_object(id)
    }

    pub fn deselect(&mut self) {
        self.engine.update_object(ObjectUpdate::Clear);
    }

    pub fn delete_decoration(&mut self, id: &str) {
        self.engine.delete_object(id);
    }

    pub fn delete_selected(&mut self) {
        self.engine.delete_selected();
    }

    /// Recolor one region of the base design
    pub fn recolor_region(&mut self, id: &str, fill: &str) -> Result<(), CustomizerError> {
        if parse_hex_color(fill).is_none() {
            return Err(CustomizerError::InvalidColor(fill.to_string()));
        }
        self.store.try_dispatch(StoreAction::UpdateRegionColor {
            id: id.to_string(),
            fill: fill.to_string(),
        })?;
        let colors = self.store.read(|s| s.colors.clone());
        self.engine.apply_colors(&colors);
        Ok(())
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Pointer sample on the 3D view in client coordinates.
    ///
    /// Returns whether the sample reached the editing surface.
    pub async fn pointer_3d(&mut self, phase: PointerPhase, x: f32, y: f32) -> bool {
        if self.view != View::Model {
            return false;
        }

        if phase == PointerPhase::Down && self.placement.is_some() {
            let Some(uv) = self.viewport.pick(x, y) else {
                return false;
            };
            return self.place_pending(uv).await;
        }

        match self.viewport.pointer(phase, x, y) {
            PointerOutcome::Hit(pointer) => {
                self.engine
                    .handle_interaction(pointer.uv, pointer.phase, Some(pointer.client));
                true
            }
            PointerOutcome::Released => {
                self.engine.end_gesture();
                true
            }
            PointerOutcome::Miss => false,
        }
    }

    async fn place_pending(&mut self, uv: Vec2) -> bool {
        let Some(pending) = self.placement.take() else {
            return false;
        };
        let placed = match pending {
            PendingPlacement::Text => Some(self.engine.add_text(Some(uv))),
            PendingPlacement::Image(bytes) => self.engine.add_image(bytes, Some(uv)).await,
        };
        self.update_lock();
        placed.is_some()
    }

    /// Pointer sample on the flat editing view in surface pixels
    pub fn pointer_2d(&mut self, phase: PointerPhase, x: f32, y: f32) -> bool {
        if self.view != View::Surface {
            return false;
        }
        let uv = pixel_to_surface_uv(Vec2::new(x, y), self.engine.size());
        self.engine.handle_interaction(uv, phase, None);
        true
    }

    /// Pointer left the 3D view
    pub fn pointer_leave(&mut self) {
        if self.viewport.cancel_press() {
            self.engine.end_gesture();
        }
    }

    pub fn orbit(&mut self, delta: Vec2) -> bool {
        self.update_lock();
        self.viewport.orbit(delta)
    }

    pub fn pan(&mut self, delta: Vec2) -> bool {
        self.update_lock();
        self.viewport.pan(delta)
    }

    pub fn zoom(&mut self, lines: f32) -> bool {
        self.update_lock();
        self.viewport.zoom(lines)
    }

    /// Switch between the model and the flat surface, ending any gesture
    pub fn set_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        self.engine.end_gesture();
        self.viewport.cancel_press();
        self.placement = None;
        self.view = view;
        info!("View switched to {:?}", view);
        self.frame();
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Flush surface events to the store and refresh the texture
    pub fn frame(&mut self) -> SyncReport {
        let report = self.coordinator.sync(&mut self.engine);
        self.bridge.refresh(&self.engine);
        self.update_lock();
        report
    }

    fn update_lock(&mut self) {
        let lock = ControlLock {
            text_placement: matches!(self.placement, Some(PendingPlacement::Text)),
            image_placement: matches!(self.placement, Some(PendingPlacement::Image(_))),
            dragging: self.engine.gesture_phase() == GesturePhase::Dragging,
            selection: self.engine.selected().is_some(),
        };
        self.viewport.set_lock(lock);
    }

    pub fn render(&self) -> Result<RgbaImage, ViewportError> {
        self.viewport.render(self.bridge.texture())
    }

    /// PNG data URI of the model from the default camera pose
    pub async fn capture_screenshot(&mut self) -> Result<String, ViewportError> {
        self.viewport.capture_screenshot(self.bridge.texture()).await
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Save the current design to the cart.
    ///
    /// Replaces the item being edited, if any. Returns the id of the cart
    /// entry that holds the design.
    pub async fn add_to_cart(&mut self, quantity: u32) -> Result<String, CustomizerError> {
        self.engine.end_gesture();
        self.frame();

        let preview = match self.capture_screenshot().await {
            Ok(uri) => uri,
            Err(e) => {
                warn!("Cart preview unavailable: {}", e);
                String::new()
            }
        };
        let document = self.engine.to_document();
        let item = self
            .store
            .read(|s| build_line_item(s, &document, preview, quantity, now_millis()))?;

        let replaced = item.save_id.as_deref().and_then(|save_id| {
            self.store.read(|s| {
                s.cart
                    .items
                    .iter()
                    .find(|e| e.id == save_id || e.save_id.as_deref() == Some(save_id))
                    .map(|e| e.id.clone())
            })
        });
        let id = replaced.clone().unwrap_or_else(|| item.id.clone());

        self.store.try_dispatch(StoreAction::AddToCart(item))?;
        match replaced {
            Some(_) => info!("Cart item {} updated", id),
            None => info!("Cart item {} added", id),
        }
        Ok(id)
    }

    /// Restore a cart item into the editor
    pub fn edit_cart_item(&mut self, id: &str) -> Result<usize, CustomizerError> {
        let item = self
            .store
            .read(|s| s.cart.item(id).cloned())
            .ok_or_else(|| StoreError::UnknownCartItem(id.to_string()))?;
        self.placement = None;
        self.viewport.cancel_press();
        let previous = self.store.read(|s| s.product_type);
        let recreated = self.coordinator.rehydrate(&mut self.engine, &item);
        self.follow_product_type(previous);
        self.frame();
        Ok(recreated)
    }

    pub fn remove_cart_item(&mut self, id: &str) -> Result<(), CustomizerError> {
        self.store
            .try_dispatch(StoreAction::RemoveFromCart { id: id.to_string() })?;
        Ok(())
    }

    pub fn set_cart_quantity(&mut self, id: &str, quantity: u32) -> Result<(), CustomizerError> {
        self.store.try_dispatch(StoreAction::SetCartQuantity {
            id: id.to_string(),
            quantity,
        })?;
        Ok(())
    }
}

impl std::fmt::Debug for Customizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customizer")
            .field("view", &self.view)
            .field("placement", &self.placement)
            .field("engine", &self.engine)
            .field("viewport", &self.viewport)
            .finish()
    }
}
