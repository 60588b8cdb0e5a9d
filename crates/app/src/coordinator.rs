//! Decoration lifecycle coordinator
//!
//! Translates editing-surface events into store actions. Pending objects get
//! their decoration id here; every settle becomes exactly one
//! `updateDecoration`; gesture frames never reach the store.

use tailor_ipc::{CartLineItem, DecorationPatch, StoreAction};
use tailor_store::StoreHandle;
use tailor_surface::{EditingSurface, ObjectHandle, ObjectIdentity, SurfaceEvent};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What one sync pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub settled: usize,
    /// Gesture frames seen (never persisted)
    pub transforming: usize,
    pub removed: usize,
    pub selection_changes: usize,
}

impl SyncReport {
    /// Whether any event was processed
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct LifecycleCoordinator {
    store: StoreHandle,
    events: UnboundedReceiver<SurfaceEvent>,
}

impl LifecycleCoordinator {
    pub fn new(store: StoreHandle, events: UnboundedReceiver<SurfaceEvent>) -> Self {
        Self { store, events }
    }

    /// Drain every pending surface event into the store
    pub fn sync(&mut self, engine: &mut EditingSurface) -> SyncReport {
        let mut report = SyncReport::default();
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(engine, event, &mut report);
        }
        if report.transforming > 0 || report.settled > 0 {
            debug!(
                "Synced {} gesture frames, {} settles",
                report.transforming, report.settled
            );
        }
        report
    }

    fn handle_event(&self, engine: &mut EditingSurface, event: SurfaceEvent, report: &mut SyncReport) {
        match event {
            SurfaceEvent::ObjectAdded { handle } => {
                report.added += 1;
                self.object_added(engine, handle);
            }
            SurfaceEvent::ObjectTransforming { .. } => report.transforming += 1,
            SurfaceEvent::ObjectSettled { handle } => {
                report.settled += 1;
                let Some(decoration) = engine.snapshot(handle) else {
                    debug!("Settle of uncommitted object {:?} ignored", handle);
                    return;
                };
                self.store.dispatch(StoreAction::UpdateDecoration {
                    id: decoration.id().to_string(),
                    patch: DecorationPatch::snapshot(&decoration),
                });
            }
            SurfaceEvent::ObjectRemoved { id, .. } => {
                report.removed += 1;
                if let Some(id) = id {
                    self.store.dispatch(StoreAction::RemoveDecoration { id });
                }
            }
            SurfaceEvent::SelectionChanged { handle } => {
                report.selection_changes += 1;
                let id = handle
                    .and_then(|h| engine.identity(h))
                    .and_then(|identity| identity.id().map(str::to_string));
                self.store
                    .dispatch(StoreAction::SetSelectedDecoration { id });
            }
        }
    }

    fn object_added(&self, engine: &mut EditingSurface, handle: ObjectHandle) {
        let id = match engine.identity(handle) {
            None => {
                debug!("Object {:?} gone before sync", handle);
                return;
            }
            Some(ObjectIdentity::Committed(id)) => {
                if self.store.read(|s| s.has_decoration(id)) {
                    return;
                }
                id.clone()
            }
            Some(ObjectIdentity::Pending) => {
                let id = Uuid::new_v4().to_string();
                if !engine.commit_id(handle, &id) {
                    warn!("Could not commit id for {:?}", handle);
                    return;
                }
                id
            }
        };

        match engine.snapshot(handle) {
            Some(decoration) => {
                debug!("Decoration {} added", id);
                self.store.dispatch(StoreAction::AddDecoration(decoration));
            }
            None => warn!("Decoration {} has no snapshot", id),
        }
    }

    /// Restore a cart item for editing.
    ///
    /// Returns the number of decorations recreated on the surface.
    pub fn rehydrate(&mut self, engine: &mut EditingSurface, item: &CartLineItem) -> usize {
        engine.clear_decorations();
        self.sync(engine);

        let model_id = self
            .store
            .read(|s| s.catalog.model_by_path(&item.model_path).map(|m| m.id.clone()));
        match model_id {
            Some(id) => self.store.dispatch(StoreAction::SetSelectedModel { id }),
            None => warn!("Cart item {} references unknown model {}", item.id, item.model_path),
        }
        self.store.dispatch(StoreAction::LoadSavedDesign {
            id: item.design.id.clone(),
        });
        self.store
            .dispatch(StoreAction::LoadSavedColors(item.path_colors.clone()));
        self.store
            .dispatch(StoreAction::LoadSavedDecorations(item.decorations.clone()));
        self.store.dispatch(StoreAction::SetCurrentSaveId {
            id: Some(item.id.clone()),
        });

        engine.load_base_design(&item.design.path);

        let recreated = match item.scene_document() {
            Ok(document) => engine.replay_document(&document),
            Err(e) => {
                warn!("Scene document of {} unreadable, using decoration list: {}", item.id, e);
                item.decorations
                    .iter()
                    .filter(|d| engine.recreate_from_properties(d).is_some())
                    .count()
            }
        };
        self.sync(engine);

        info!("Rehydrated cart item {} with {} decorations", item.id, recreated);
        recreated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tailor_config::SurfaceConfig;
    use tailor_ipc::{Catalog, PointerPhase};
    use tailor_surface::{FontBook, MemoryAssets, ObjectUpdate};

    fn setup() -> (EditingSurface, LifecycleCoordinator, StoreHandle) {
        let store = StoreHandle::new(Catalog::default());
        let mut engine = EditingSurface::new(
            SurfaceConfig::default(),
            store.clone(),
            Rc::new(MemoryAssets::new()),
            FontBook::new(),
        );
        let events = engine.subscribe().unwrap();
        let coordinator = LifecycleCoordinator::new(store.clone(), events);
        (engine, coordinator, store)
    }

    #[test]
    fn test_pending_object_gets_id_and_store_entry() {
        let (mut engine, mut coordinator, store) = setup();
        let handle = engine.add_text(None);
        let report = coordinator.sync(&mut engine);

        assert_eq!(report.added, 1);
        let id = engine.identity(handle).and_then(|i| i.id()).unwrap().to_string();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(store.read(|s| s.decorations.len()), 1);
        assert_eq!(store.read(|s| s.selected_decoration.clone()), Some(id));
    }

    #[test]
    fn test_drag_produces_one_update() {
        let (mut engine, mut coordinator, store) = setup();
        engine.add_text(None);
        coordinator.sync(&mut engine);
        let mut actions = store.subscribe();

        let size = engine.size();
        let at = |x: f32, y: f32| glam::Vec2::new(x, y) / size;
        engine.handle_interaction(at(105.0, 105.0), PointerPhase::Down, None);
        for step in 1..=30 {
            engine.handle_interaction(at(105.0 + step as f32, 105.0), PointerPhase::Move, None);
        }
        engine.handle_interaction(at(135.0, 105.0), PointerPhase::Up, None);
        let report = coordinator.sync(&mut engine);

        assert_eq!(report.transforming, 30);
        assert_eq!(report.settled, 1);
        let mut names = Vec::new();
        while let Ok(action) = actions.try_recv() {
            names.push(action.name());
        }
        assert_eq!(names, vec!["updateDecoration"]);
        let left = store.read(|s| s.decorations[0].placement().left);
        assert!((left - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_removal_and_deselect_reach_store() {
        let (mut engine, mut coordinator, store) = setup();
        engine.add_text(None);
        coordinator.sync(&mut engine);

        engine.update_object(ObjectUpdate::Clear);
        coordinator.sync(&mut engine);
        assert_eq!(store.read(|s| s.selected_decoration.clone()), None);

        engine.delete_object(&store.read(|s| s.decorations[0].id().to_string()));
        coordinator.sync(&mut engine);
        assert!(store.read(|s| s.decorations.is_empty()));
    }

    #[test]
    fn test_committed_object_missing_from_store_is_added() {
        let (mut engine, mut coordinator, store) = setup();
        let decoration = tailor_ipc::Decoration::Text {
            id: "kept".into(),
            properties: tailor_ipc::TextProperties {
                text: "Hi".into(),
                font_family: "Arial".into(),
                fill: "#000000".into(),
                stroke_width: 0.0,
                stroke: "#000000".into(),
                placement: tailor_ipc::Placement::at(1.0, 2.0),
            },
        };
        engine.recreate_from_properties(&decoration);
        coordinator.sync(&mut engine);
        assert_eq!(store.read(|s| s.decoration("kept").cloned()), Some(decoration));
    }

    #[test]
    fn test_added_then_removed_before_sync() {
        let (mut engine, mut coordinator, store) = setup();
        engine.add_text(None);
        engine.delete_selected();
        let report = coordinator.sync(&mut engine);
        assert_eq!(report.added, 1);
        assert!(store.read(|s| s.decorations.is_empty()));
    }
}
