//! Editing surface engine
//!
//! Owns the 2D scene: an optional background group built from the base
//! design plus decoration objects in z-order. Structural changes and gesture
//! progress are reported as [`SurfaceEvent`]s; every completed mutation bumps
//! the scene revision so the texture bridge knows when to rasterize.

mod document;
mod interaction;

use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use tailor_config::SurfaceConfig;
use tailor_ipc::{Decoration, DecorationPatch, ImageProperties, Placement, TextProperties};
use tailor_store::StoreHandle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::assets::AssetSource;
use crate::background::BackgroundGroup;
use crate::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_POSITION, DEFAULT_TEXT, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SCALE,
    INITIAL_IMAGE_WIDTH,
};
use crate::error::SurfaceError;
use crate::events::SurfaceEvent;
use crate::gesture::{GesturePhase, GestureState};
use crate::image_source::{decode_image, encode_data_uri, read_source};
use crate::object::{
    ImageContent, ObjectContent, ObjectHandle, ObjectIdentity, SceneObject, TextContent,
};
use crate::text::FontBook;
use crate::validation::sanitize_decoration;

/// Id used to describe objects that have not been committed yet
const PENDING_ID: &str = "pending";

/// Programmatic update of the selected object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectUpdate {
    /// Apply the given fields and settle immediately
    Patch(DecorationPatch),
    /// Deselect, settling unsynced changes
    Clear,
}

/// The 2D editing surface.
pub struct EditingSurface {
    config: SurfaceConfig,
    store: StoreHandle,
    assets: Rc<dyn AssetSource>,
    fonts: FontBook,

    background: Option<BackgroundGroup>,
    /// Decorations bottom to top
    objects: Vec<SceneObject>,
    /// Committed decoration id to object
    index: HashMap<String, ObjectHandle>,
    next_handle: u64,

    active: Option<ObjectHandle>,
    gesture: GestureState,
    revision: u64,

    events_tx: UnboundedSender<SurfaceEvent>,
    events_rx: Option<UnboundedReceiver<SurfaceEvent>>,
}

impl EditingSurface {
    pub fn new(
        config: SurfaceConfig,
        store: StoreHandle,
        assets: Rc<dyn AssetSource>,
        fonts: FontBook,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        info!(
            "Editing surface created: {}x{}",
            config.width, config.height
        );
        Self {
            config,
            store,
            assets,
            fonts,
            background: None,
            objects: Vec::new(),
            index: HashMap::new(),
            next_handle: 1,
            active: None,
            gesture: GestureState::Idle,
            revision: 0,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Take the event receiver. Only the first call returns it.
    pub fn subscribe(&mut self) -> Option<UnboundedReceiver<SurfaceEvent>> {
        self.events_rx.take()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.config.width_f32(), self.config.height_f32())
    }

    /// Counter bumped by every completed scene mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn background(&self) -> Option<&BackgroundGroup> {
        self.background.as_ref()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.handle == handle)
    }

    pub fn identity(&self, handle: ObjectHandle) -> Option<&ObjectIdentity> {
        self.object(handle).map(SceneObject::identity)
    }

    /// Handle of the object committed under `id`
    pub fn handle_for(&self, id: &str) -> Option<ObjectHandle> {
        self.index.get(id).copied()
    }

    /// Current properties of a committed object
    pub fn snapshot(&self, handle: ObjectHandle) -> Option<Decoration> {
        self.object(handle).and_then(SceneObject::to_decoration)
    }

    /// Snapshots of every committed object in z-order
    pub fn decorations(&self) -> Vec<Decoration> {
        self.objects
            .iter()
            .filter_map(SceneObject::to_decoration)
            .collect()
    }

    pub fn selected(&self) -> Option<ObjectHandle> {
        self.active
    }

    pub fn selected_id(&self) -> Option<String> {
        self.active
            .and_then(|handle| self.object(handle))
            .and_then(|o| o.id().map(str::to_string))
    }

    // ========================================================================
    // Object creation
    // ========================================================================

    /// Insert a default text decoration at `position` (surface UV) and select it
    pub fn add_text(&mut self, position: Option<Vec2>) -> ObjectHandle {
        let origin = self.position_for(position);
        let placement = Placement::at(origin.x, origin.y).with_scale(DEFAULT_TEXT_SCALE);
        let properties = TextProperties {
            text: DEFAULT_TEXT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            fill: DEFAULT_TEXT_COLOR.to_string(),
            stroke_width: 0.0,
            stroke: DEFAULT_TEXT_COLOR.to_string(),
            placement,
        };
        let content = ObjectContent::Text(TextContent::new(&properties, &self.fonts));

        let handle = self.insert(ObjectIdentity::Pending, placement, content);
        debug!("Text added at ({:.1}, {:.1})", origin.x, origin.y);
        self.end_gesture();
        self.set_active(handle);
        handle
    }

    /// Decode an uploaded image off the caller's path and insert it selected.
    ///
    /// The image is scaled so its width spans a fixed number of surface units.
    pub async fn add_image(&mut self, bytes: Vec<u8>, position: Option<Vec2>) -> Option<ObjectHandle> {
        let decoded = tokio::task::spawn_blocking(move || {
            let src = encode_data_uri(&bytes)?;
            let image = decode_image(&bytes)?;
            Ok::<_, SurfaceError>((src, image))
        })
        .await
        .map_err(|e| SurfaceError::Task(e.to_string()))
        .and_then(|result| result);

        let (src, image) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Image not added: {}", e);
                return None;
            }
        };

        let origin = self.position_for(position);
        let scale = INITIAL_IMAGE_WIDTH / image.width().max(1) as f32;
        let placement = Placement::at(origin.x, origin.y).with_scale(scale);
        let content = ObjectContent::Image(ImageContent { src, image });

        let handle = self.insert(ObjectIdentity::Pending, placement, content);
        debug!("Image added at ({:.1}, {:.1}) scale {:.3}", origin.x, origin.y, scale);
        self.end_gesture();
        self.set_active(handle);
        Some(handle)
    }

    /// Upsert a committed object from a persisted property bag.
    ///
    /// Existing objects are overwritten in place; images are re-decoded only
    /// when `src` changed. New objects are appended on top.
    pub fn recreate_from_properties(&mut self, decoration: &Decoration) -> Option<ObjectHandle> {
        let decoration = match sanitize_decoration(decoration) {
            Ok(clean) => clean,
            Err(e) => {
                warn!("Decoration {} rejected: {}", decoration.id(), e);
                return None;
            }
        };

        if let Some(handle) = self.handle_for(decoration.id()) {
            if let Err(e) = self.overwrite(handle, &decoration) {
                warn!("Decoration {} not updated: {}", decoration.id(), e);
                return None;
            }
            if let Some(object) = self.object_mut(handle) {
                object.unsynced = false;
            }
            self.touch();
            return Some(handle);
        }

        let content = match self.build_content(&decoration) {
            Ok(content) => content,
            Err(e) => {
                warn!("Decoration {} not recreated: {}", decoration.id(), e);
                return None;
            }
        };
        let identity = ObjectIdentity::Committed(decoration.id().to_string());
        let handle = self.insert(identity, *decoration.placement(), content);
        self.index.insert(decoration.id().to_string(), handle);
        debug!("Decoration {} recreated", decoration.id());
        Some(handle)
    }

    /// Give a pending object its decoration id
    pub fn commit_id(&mut self, handle: ObjectHandle, id: &str) -> bool {
        if id.is_empty() || self.index.contains_key(id) {
            return false;
        }
        let Some(object) = self.object_mut(handle) else {
            return false;
        };
        if object.identity != ObjectIdentity::Pending {
            return false;
        }
        object.identity = ObjectIdentity::Committed(id.to_string());
        self.index.insert(id.to_string(), handle);
        true
    }

    // ========================================================================
    // Mutation and selection
    // ========================================================================

    pub fn update_object(&mut self, update: ObjectUpdate) {
        match update {
            ObjectUpdate::Patch(patch) => self.patch_selected(&patch),
            ObjectUpdate::Clear => self.clear_selection(),
        }
    }

    fn patch_selected(&mut self, patch: &DecorationPatch) {
        let Some(handle) = self.active else {
            debug!("Update ignored: nothing selected");
            return;
        };
        let Some(object) = self.object(handle) else {
            return;
        };

        let id = object.id().unwrap_or(PENDING_ID).to_string();
        let mut decoration = object.describe(id);
        decoration.apply_patch(patch);

        // Interactive edits keep the scale uniform
        let placement = decoration.placement_mut();
        match (patch.scale_x, patch.scale_y) {
            (Some(x), None) => placement.scale_y = x,
            (None, Some(y)) => placement.scale_x = y,
            _ => {}
        }

        let decoration = match sanitize_decoration(&decoration) {
            Ok(clean) => clean,
            Err(e) => {
                warn!("Update rejected: {}", e);
                return;
            }
        };
        if let Err(e) = self.overwrite(handle, &decoration) {
            warn!("Update not applied: {}", e);
            return;
        }
        // The settle below covers any gesture in flight
        self.gesture = GestureState::Idle;
        self.settle(handle);
    }

    /// Remove the object committed under `id`
    pub fn delete_object(&mut self, id: &str) {
        match self.handle_for(id) {
            Some(handle) => self.remove(handle),
            None => debug!("Delete ignored: unknown decoration {}", id),
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(handle) = self.active {
            self.remove(handle);
        }
    }

    /// Select the object committed under `id`
    pub fn select_object(&mut self, id: &str) -> bool {
        let Some(handle) = self.handle_for(id) else {
            debug!("Select ignored: unknown decoration {}", id);
            return false;
        };
        self.end_gesture();
        self.set_active(handle);
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn position_for(&self, uv: Option<Vec2>) -> Vec2 {
        uv.filter(|uv| uv.is_finite())
            .map(|uv| uv * self.size())
            .unwrap_or(Vec2::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1))
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.handle == handle)
    }

    fn insert(
        &mut self,
        identity: ObjectIdentity,
        placement: Placement,
        content: ObjectContent,
    ) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.objects
            .push(SceneObject::new(handle, identity, placement, content));
        self.touch();
        self.emit(SurfaceEvent::ObjectAdded { handle });
        handle
    }

    fn remove(&mut self, handle: ObjectHandle) {
        let Some(position) = self.objects.iter().position(|o| o.handle == handle) else {
            return;
        };
        if self.gesture.anchor().is_some_and(|a| a.handle == handle) {
            self.gesture = GestureState::Idle;
        }
        let object = self.objects.remove(position);
        let id = object.id().map(str::to_string);
        if let Some(id) = &id {
            self.index.remove(id);
        }
        self.touch();
        debug!("Object {:?} removed ({:?})", handle, id);
        self.emit(SurfaceEvent::ObjectRemoved { handle, id });

        if self.active == Some(handle) {
            self.active = None;
            self.emit(SurfaceEvent::SelectionChanged { handle: None });
        }
    }

    fn build_content(&self, decoration: &Decoration) -> Result<ObjectContent, SurfaceError> {
        Ok(match decoration {
            Decoration::Text { properties, .. } => {
                ObjectContent::Text(TextContent::new(properties, &self.fonts))
            }
            Decoration::Image { properties, .. } => ObjectContent::Image(self.load_image(properties)?),
        })
    }

    fn load_image(&self, properties: &ImageProperties) -> Result<ImageContent, SurfaceError> {
        let bytes = read_source(&properties.src, self.assets.as_ref())?;
        Ok(ImageContent {
            src: properties.src.clone(),
            image: decode_image(&bytes)?,
        })
    }

    /// Replace an object's properties, keeping decoded images whose source is unchanged
    fn overwrite(&mut self, handle: ObjectHandle, decoration: &Decoration) -> Result<(), SurfaceError> {
        let Some(object) = self.object(handle) else {
            return Ok(());
        };
        let keep_image = matches!(
            (&object.content, decoration),
            (ObjectContent::Image(current), Decoration::Image { properties, .. })
                if current.src == properties.src
        );
        let content = if keep_image {
            None
        } else {
            Some(self.build_content(decoration)?)
        };

        if let Some(object) = self.object_mut(handle) {
            object.placement = *decoration.placement();
            if let Some(content) = content {
                object.content = content;
            }
        }
        Ok(())
    }

    /// Make `handle` the active object, settling the previous one if needed
    fn set_active(&mut self, handle: ObjectHandle) {
        if self.active == Some(handle) {
            return;
        }
        if let Some(previous) = self.active {
            if self.object(previous).is_some_and(|o| o.unsynced) {
                self.settle(previous);
            }
        }
        self.active = Some(handle);
        self.emit(SurfaceEvent::SelectionChanged {
            handle: Some(handle),
        });
    }

    /// Deselect, settling any unsynced change first
    pub(crate) fn clear_selection(&mut self) {
        self.end_gesture();
        let Some(previous) = self.active.take() else {
            return;
        };
        if self.object(previous).is_some_and(|o| o.unsynced) {
            self.settle(previous);
        }
        self.emit(SurfaceEvent::SelectionChanged { handle: None });
    }

    /// Finish a modification: the object is in sync again and the store should see it
    fn settle(&mut self, handle: ObjectHandle) {
        let Some(object) = self.object_mut(handle) else {
            return;
        };
        object.unsynced = false;
        self.touch();
        self.emit(SurfaceEvent::ObjectSettled { handle });
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn emit(&self, event: SurfaceEvent) {
        if self.events_tx.send(event).is_err() {
            debug!("Surface event dropped: no receiver");
        }
    }
}

impl std::fmt::Debug for EditingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSurface")
            .field("size", &(self.config.width, self.config.height))
            .field("objects", &self.objects.len())
            .field("active", &self.active)
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::background::tests::THREE_BANDS;
    use crate::image_source::tests::png_bytes;
    use tailor_ipc::{Catalog, StoreAction};

    pub(crate) fn surface_with(assets: MemoryAssets) -> (EditingSurface, StoreHandle) {
        let store = StoreHandle::new(Catalog::default());
        let assets = assets.with("/designs/bands.svg", THREE_BANDS.as_bytes().to_vec());
        let surface = EditingSurface::new(
            SurfaceConfig::default(),
            store.clone(),
            Rc::new(assets),
            FontBook::new(),
        );
        (surface, store)
    }

    pub(crate) fn surface() -> (EditingSurface, StoreHandle) {
        surface_with(MemoryAssets::new())
    }

    pub(crate) fn drain(rx: &mut UnboundedReceiver<SurfaceEvent>) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    pub(crate) fn text_decoration(id: &str, left: f32, top: f32) -> Decoration {
        Decoration::Text {
            id: id.into(),
            properties: TextProperties {
                text: "Hello".into(),
                font_family: "Arial".into(),
                fill: "#ff0000".into(),
                stroke_width: 0.0,
                stroke: "#000000".into(),
                placement: Placement::at(left, top),
            },
        }
    }

    #[test]
    fn test_subscribe_only_once() {
        let (mut surface, _) = surface();
        assert!(surface.subscribe().is_some());
        assert!(surface.subscribe().is_none());
    }

    #[test]
    fn test_add_text_defaults() {
        let (mut surface, _) = surface();
        let mut rx = surface.subscribe().unwrap();
        let handle = surface.add_text(None);

        let object = surface.object(handle).unwrap();
        assert_eq!(object.identity(), &ObjectIdentity::Pending);
        assert_eq!((object.placement().left, object.placement().top), (100.0, 100.0));
        assert_eq!(object.placement().scale_x, DEFAULT_TEXT_SCALE);
        match object.content() {
            ObjectContent::Text(text) => {
                assert_eq!(text.text, "Edit me");
                assert_eq!(text.font_family, "Arial");
                assert_eq!(text.fill, "#000000");
                assert_eq!(text.stroke_width, 0.0);
            }
            ObjectContent::Image(_) => panic!("expected text"),
        }

        assert_eq!(surface.selected(), Some(handle));
        assert_eq!(
            drain(&mut rx),
            vec![
                SurfaceEvent::ObjectAdded { handle },
                SurfaceEvent::SelectionChanged {
                    handle: Some(handle)
                },
            ]
        );
    }

    #[test]
    fn test_add_text_at_uv() {
        let (mut surface, _) = surface();
        let handle = surface.add_text(Some(Vec2::new(0.5, 0.25)));
        let placement = *surface.object(handle).unwrap().placement();
        assert_eq!((placement.left, placement.top), (250.0, 125.0));
    }

    #[tokio::test]
    async fn test_add_image_scales_to_initial_width() {
        let (mut surface, _) = surface();
        let handle = surface
            .add_image(png_bytes(200, 100, [0, 0, 255, 255]), None)
            .await
            .unwrap();
        let object = surface.object(handle).unwrap();
        assert!((object.placement().scale_x - 0.25).abs() < 1e-6);
        assert_eq!(object.placement().scale_x, object.placement().scale_y);
        match object.content() {
            ObjectContent::Image(image) => assert!(image.src.starts_with("data:image/png;base64,")),
            ObjectContent::Text(_) => panic!("expected image"),
        }
        assert_eq!(surface.selected(), Some(handle));
    }

    #[tokio::test]
    async fn test_add_image_rejects_garbage() {
        let (mut surface, _) = surface();
        let mut rx = surface.subscribe().unwrap();
        assert!(surface.add_image(b"not an image".to_vec(), None).await.is_none());
        assert!(surface.objects().is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_commit_id_once() {
        let (mut surface, _) = surface();
        let handle = surface.add_text(None);
        assert!(surface.commit_id(handle, "a"));
        assert!(!surface.commit_id(handle, "b"));
        assert_eq!(surface.handle_for("a"), Some(handle));
        assert_eq!(surface.selected_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_recreate_is_idempotent_upsert() {
        let (mut surface, _) = surface();
        let mut rx = surface.subscribe().unwrap();

        let first = surface
            .recreate_from_properties(&text_decoration("t1", 10.0, 20.0))
            .unwrap();
        let second = surface
            .recreate_from_properties(&text_decoration("t1", 30.0, 40.0))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(surface.objects().len(), 1);
        assert_eq!(surface.object(first).unwrap().placement().left, 30.0);
        assert_eq!(
            drain(&mut rx),
            vec![SurfaceEvent::ObjectAdded { handle: first }]
        );
    }

    #[test]
    fn test_recreate_rejects_non_finite() {
        let (mut surface, _) = surface();
        let mut decoration = text_decoration("t1", 0.0, 0.0);
        decoration.placement_mut().scale_x = f32::INFINITY;
        assert!(surface.recreate_from_properties(&decoration).is_none());
        assert!(surface.objects().is_empty());
    }

    #[test]
    fn test_recreate_clamps_opacity() {
        let (mut surface, _) = surface();
        let mut decoration = text_decoration("t1", 0.0, 0.0);
        decoration.placement_mut().opacity = 3.0;
        let handle = surface.recreate_from_properties(&decoration).unwrap();
        assert_eq!(surface.object(handle).unwrap().placement().opacity, 1.0);
    }

    #[test]
    fn test_recreate_image_from_asset_path() {
        let assets = MemoryAssets::new().with("/logos/a.png", png_bytes(10, 10, [0, 0, 0, 255]));
        let (mut surface, _) = surface_with(assets);
        let decoration = Decoration::Image {
            id: "img".into(),
            properties: ImageProperties {
                src: "/logos/a.png".into(),
                placement: Placement::at(5.0, 5.0),
            },
        };
        let handle = surface.recreate_from_properties(&decoration).unwrap();
        assert_eq!(surface.snapshot(handle), Some(decoration));
    }

    #[test]
    fn test_recreate_missing_image_is_ignored() {
        let (mut surface, _) = surface();
        let decoration = Decoration::Image {
            id: "img".into(),
            properties: ImageProperties {
                src: "/logos/missing.png".into(),
                placement: Placement::default(),
            },
        };
        assert!(surface.recreate_from_properties(&decoration).is_none());
    }

    #[test]
    fn test_patch_selected_settles_immediately() {
        let (mut surface, _) = surface();
        let handle = surface.add_text(None);
        let mut rx = surface.subscribe().unwrap();
        drain(&mut rx);
        let revision = surface.revision();

        surface.update_object(ObjectUpdate::Patch(DecorationPatch {
            text: Some("Team".into()),
            scale_x: Some(2.0),
            ..Default::default()
        }));

        let object = surface.object(handle).unwrap();
        assert_eq!(object.placement().scale_y, 2.0);
        match object.content() {
            ObjectContent::Text(text) => assert_eq!(text.text, "Team"),
            ObjectContent::Image(_) => panic!("expected text"),
        }
        assert!(surface.revision() > revision);
        assert_eq!(drain(&mut rx), vec![SurfaceEvent::ObjectSettled { handle }]);
    }

    #[test]
    fn test_patch_without_selection_is_ignored() {
        let (mut surface, _) = surface();
        let handle = surface.add_text(None);
        surface.update_object(ObjectUpdate::Clear);
        surface.update_object(ObjectUpdate::Patch(DecorationPatch {
            left: Some(1.0),
            ..Default::default()
        }));
        assert_eq!(surface.object(handle).unwrap().placement().left, 100.0);
    }

    #[test]
    fn test_clear_never_mutates() {
        let (mut surface, _) = surface();
        let handle = surface.add_text(None);
        let before = *surface.object(handle).unwrap().placement();
        let mut rx = surface.subscribe().unwrap();
        drain(&mut rx);

        surface.update_object(ObjectUpdate::Clear);
        assert_eq!(*surface.object(handle).unwrap().placement(), before);
        assert_eq!(surface.selected(), None);
        assert_eq!(
            drain(&mut rx),
            vec![SurfaceEvent::SelectionChanged { handle: None }]
        );
    }

    #[test]
    fn test_delete_object() {
        let (mut surface, _) = surface();
        let handle = surface.add_text(None);
        surface.commit_id(handle, "t1");
        let mut rx = surface.subscribe().unwrap();
        drain(&mut rx);

        surface.delete_object("unknown");
        surface.delete_object("t1");

        assert!(surface.objects().is_empty());
        assert_eq!(surface.handle_for("t1"), None);
        assert_eq!(
            drain(&mut rx),
            vec![
                SurfaceEvent::ObjectRemoved {
                    handle,
                    id: Some("t1".into())
                },
                SurfaceEvent::SelectionChanged { handle: None },
            ]
        );
    }

    #[test]
    fn test_select_object_by_id() {
        let (mut surface, _) = surface();
        let handle = surface
            .recreate_from_properties(&text_decoration("t1", 0.0, 0.0))
            .unwrap();
        assert!(surface.select_object("t1"));
        assert!(!surface.select_object("nope"));
        assert_eq!(surface.selected(), Some(handle));
    }

    #[test]
    fn test_store_untouched_by_engine_mutations() {
        let (mut surface, store) = surface();
        let mut actions = store.subscribe();
        surface.add_text(None);
        surface.update_object(ObjectUpdate::Clear);
        assert!(actions.try_recv().is_err());
        store.dispatch(StoreAction::ClearColors);
        assert!(actions.try_recv().is_ok());
    }
}
