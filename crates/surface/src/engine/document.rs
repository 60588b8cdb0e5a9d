//! Base design loading, region colors, rasterization, and scene documents

use tailor_ipc::{ColorRegion, SceneDocument, SceneRecord, StoreAction};
use tracing::{debug, info, warn};

use super::EditingSurface;
use crate::background::BackgroundGroup;
use crate::error::SurfaceError;
use crate::events::SurfaceEvent;
use crate::raster::render_scene;
use crate::surface::CpuSurface;

impl EditingSurface {
    /// Clear the scene and load the design at `path` as its background.
    ///
    /// Decorations leave the scene without removal events, so the store keeps
    /// them. Region colors are regenerated in the store only when it holds no
    /// regions or a different number of them; otherwise the store's colors
    /// are applied to the new background. Returns whether a background is
    /// loaded afterwards.
    pub fn load_base_design(&mut self, path: &str) -> bool {
        self.reset_scene();

        let group = match self.parse_design(path) {
            Ok(group) => group,
            Err(e) => {
                warn!("Base design {} not loaded: {}", path, e);
                return false;
            }
        };

        let count = group.colorable_count();
        let stored = self.store.read(|s| s.colors.clone());
        let mut group = group;
        if stored.is_empty() || stored.len() != count {
            debug!(
                "Regenerating {} regions (store had {})",
                count,
                stored.len()
            );
            self.store
                .dispatch(StoreAction::SetRegionColors(group.derive_regions()));
        } else {
            group.apply_regions(&stored);
        }

        info!("Base design {} loaded with {} regions", path, count);
        self.background = Some(group);
        self.touch();
        true
    }

    fn reset_scene(&mut self) {
        self.end_gesture();
        if self.active.take().is_some() {
            self.emit(SurfaceEvent::SelectionChanged { handle: None });
        }
        let had_content = self.background.take().is_some() || !self.objects.is_empty();
        self.objects.clear();
        self.index.clear();
        if had_content {
            self.touch();
        }
    }

    fn parse_design(&self, path: &str) -> Result<BackgroundGroup, SurfaceError> {
        let bytes = self.assets.read(path)?;
        let group = BackgroundGroup::parse(&bytes, self.config.width_f32(), self.config.height_f32())?;
        Ok(group.with_source(path))
    }

    /// Recolor background elements from regions with matching ids
    pub fn apply_colors(&mut self, regions: &[ColorRegion]) {
        let Some(background) = self.background.as_mut() else {
            return;
        };
        if background.colorable_count() == 0 {
            return;
        }
        let applied = background.apply_regions(regions);
        if applied > 0 {
            debug!("Applied {} region colors", applied);
            self.touch();
        }
    }

    /// Render the current scene to a fresh RGBA frame
    pub fn rasterize(&self) -> Result<CpuSurface, SurfaceError> {
        render_scene(
            self.config.width,
            self.config.height,
            &self.config.background,
            self.background.as_ref(),
            &self.objects,
        )
    }

    /// Serialize the background marker and every committed decoration
    pub fn to_document(&self) -> SceneDocument {
        let mut document = SceneDocument::new(self.config.width, self.config.height);
        if let Some(background) = &self.background {
            document.objects.push(SceneRecord::background(
                background.source.clone(),
                background.fills(),
            ));
        }
        for object in &self.objects {
            match object.to_decoration() {
                Some(decoration) => document.objects.push(SceneRecord::from_decoration(&decoration)),
                None => debug!("Pending object {:?} left out of document", object.handle()),
            }
        }
        document
    }

    /// Recreate every decoration of a document, keeping persisted ids.
    ///
    /// The background record is skipped; region colors come from the store.
    /// Returns the number of decorations recreated.
    pub fn replay_document(&mut self, document: &SceneDocument) -> usize {
        let mut recreated = 0;
        for decoration in document.decorations() {
            if self.recreate_from_properties(&decoration).is_some() {
                recreated += 1;
            }
        }
        info!(
            "Replayed {} of {} document records",
            recreated,
            document.objects.len()
        );
        recreated
    }

    /// Remove every decoration, emitting a removal for each
    pub fn clear_decorations(&mut self) {
        self.end_gesture();
        if self.active.take().is_some() {
            self.emit(SurfaceEvent::SelectionChanged { handle: None });
        }
        let objects = std::mem::take(&mut self.objects);
        self.index.clear();
        if objects.is_empty() {
            return;
        }
        for object in objects {
            let id = object.id().map(str::to_string);
            self.emit(SurfaceEvent::ObjectRemoved {
                handle: object.handle(),
                id,
            });
        }
        self.touch();
    }
}
