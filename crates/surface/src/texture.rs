//! Texture bridge between the editing surface and the 3D viewport
//!
//! Rasterizes the engine at most once per refresh and only when the scene
//! revision moved since the last frame. The resulting pixels live in a
//! [`TiledSurface`] so uploads can be limited to the tiles that changed.

use tailor_config::SurfaceConfig;
use tracing::{debug, warn};

use crate::engine::EditingSurface;
use crate::surface::CpuSurface;
use crate::tiles::{TileCoord, TiledSurface};

/// Counters for observing rasterization behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub rasterizations: u64,
    /// Refreshes that found the revision unchanged
    pub skipped: u64,
    pub failures: u64,
}

#[derive(Debug)]
pub struct TextureBridge {
    tiles: TiledSurface,
    /// Scene revision of the current texture, `None` before the first frame
    revision: Option<u64>,
    /// Bumped every time the texture contents are replaced
    generation: u64,
    stats: BridgeStats,
}

impl TextureBridge {
    pub fn new(config: &SurfaceConfig) -> Self {
        Self {
            tiles: TiledSurface::new(config.width, config.height, config.tile_size),
            revision: None,
            generation: 0,
            stats: BridgeStats::default(),
        }
    }

    /// Rasterize the engine if its revision changed. Returns whether the
    /// texture was replaced.
    pub fn refresh(&mut self, engine: &EditingSurface) -> bool {
        let revision = engine.revision();
        if self.revision == Some(revision) {
            self.stats.skipped += 1;
            return false;
        }

        match engine.rasterize() {
            Ok(frame) => {
                let dirty = self.tiles.replace(frame);
                self.revision = Some(revision);
                self.generation += 1;
                self.stats.rasterizations += 1;
                debug!(
                    "Texture generation {} at revision {} ({} dirty tiles)",
                    self.generation, revision, dirty
                );
                true
            }
            Err(e) => {
                self.stats.failures += 1;
                warn!("Rasterization failed: {}", e);
                false
            }
        }
    }

    /// Pixels of the current texture
    pub fn texture(&self) -> &CpuSurface {
        self.tiles.surface()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Tiles changed since the last call, for partial uploads
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        self.tiles.take_dirty_tiles()
    }

    pub fn tiles(&self) -> &TiledSurface {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{surface, text_decoration};

    #[test]
    fn test_refresh_only_on_revision_change() {
        let (mut engine, _) = surface();
        let mut bridge = TextureBridge::new(engine.config());

        assert!(bridge.refresh(&engine));
        assert!(!bridge.refresh(&engine));
        engine.recreate_from_properties(&text_decoration("a", 10.0, 10.0));
        assert!(bridge.refresh(&engine));

        let stats = bridge.stats();
        assert_eq!(stats.rasterizations, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(bridge.generation(), 2);
    }

    #[test]
    fn test_first_frame_marks_every_tile() {
        let (engine, _) = surface();
        let mut bridge = TextureBridge::new(engine.config());
        bridge.refresh(&engine);
        assert_eq!(bridge.take_dirty_tiles().len(), 16);
        assert_eq!(bridge.texture().get_pixel(0, 0), Some([255, 255, 255, 255]));
    }
}
