//! Tiled texture storage with dirty tracking

use std::collections::HashSet;

use crate::surface::CpuSurface;

/// Tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// Surface split into fixed-size tiles. Replacing the contents marks only the
/// tiles whose pixels changed.
#[derive(Debug, Clone)]
pub struct TiledSurface {
    surface: CpuSurface,
    tile_size: u32,
    tiles_x: u32,
    tiles_y: u32,
    dirty_tiles: HashSet<TileCoord>,
}

impl TiledSurface {
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        let tile_size = tile_size.max(1);
        Self {
            surface: CpuSurface::new(width, height),
            tile_size,
            tiles_x: width.div_ceil(tile_size),
            tiles_y: height.div_ceil(tile_size),
            dirty_tiles: HashSet::new(),
        }
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    #[inline]
    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    /// Swap in a new frame and mark the tiles that differ.
    ///
    /// A frame of a different size replaces the grid and marks every tile.
    /// Returns the number of tiles newly marked dirty.
    pub fn replace(&mut self, frame: CpuSurface) -> usize {
        if frame.width != self.surface.width || frame.height != self.surface.height {
            *self = Self::new(frame.width, frame.height, self.tile_size);
            self.surface = frame;
            self.mark_all_dirty();
            return self.dirty_tiles.len();
        }

        let before = self.dirty_tiles.len();
        for ty in 0..self.tiles_y {
            for tx in 0..self.tiles_x {
                let coord = TileCoord { x: tx, y: ty };
                if self.tile_differs(&frame, coord) {
                    self.dirty_tiles.insert(coord);
                }
            }
        }
        self.surface = frame;
        self.dirty_tiles.len() - before
    }

    fn tile_differs(&self, other: &CpuSurface, coord: TileCoord) -> bool {
        let (x0, y0, w, h) = self.get_tile_bounds(coord);
        let width = self.surface.width as usize;
        let ours = self.surface.pixels();
        let theirs = other.pixels();
        (y0..y0 + h).any(|y| {
            let start = y as usize * width + x0 as usize;
            let end = start + w as usize;
            ours[start..end] != theirs[start..end]
        })
    }

    pub fn mark_all_dirty(&mut self) {
        for ty in 0..self.tiles_y {
            for tx in 0..self.tiles_x {
                self.dirty_tiles.insert(TileCoord { x: tx, y: ty });
            }
        }
    }

    /// Get all dirty tiles and clear the dirty set
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        let mut tiles: Vec<_> = self.dirty_tiles.drain().collect();
        tiles.sort();
        tiles
    }

    #[inline]
    pub fn has_dirty_tiles(&self) -> bool {
        !self.dirty_tiles.is_empty()
    }

    #[inline]
    pub fn dirty_tile_count(&self) -> usize {
        self.dirty_tiles.len()
    }

    /// Tile bounds (x, y, width, height) in pixels, clipped at the edges
    pub fn get_tile_bounds(&self, coord: TileCoord) -> (u32, u32, u32, u32) {
        let x = coord.x * self.tile_size;
        let y = coord.y * self.tile_size;
        let width = self.tile_size.min(self.surface.width.saturating_sub(x));
        let height = self.tile_size.min(self.surface.height.saturating_sub(y));
        (x, y, width, height)
    }

    /// Row-major RGBA bytes of one tile for partial upload
    pub fn get_tile_data(&self, coord: TileCoord) -> Vec<u8> {
        let (x0, y0, w, h) = self.get_tile_bounds(coord);
        let mut data = Vec::with_capacity((w * h * 4) as usize);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if let Some(pixel) = self.surface.get_pixel(x, y) {
                    data.extend_from_slice(&pixel);
                }
            }
        }
        data
    }

    #[inline]
    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: u32, height: u32, color: [u8; 4]) -> CpuSurface {
        let mut surface = CpuSurface::new(width, height);
        surface.clear(color);
        surface
    }

    #[test]
    fn test_tile_grid_rounds_up() {
        let tiled = TiledSurface::new(500, 500, 128);
        assert_eq!((tiled.tiles_x(), tiled.tiles_y()), (4, 4));
        assert_eq!(tiled.get_tile_bounds(TileCoord { x: 3, y: 3 }), (384, 384, 116, 116));
    }

    #[test]
    fn test_identical_frame_marks_nothing() {
        let mut tiled = TiledSurface::new(256, 256, 128);
        assert_eq!(tiled.replace(CpuSurface::new(256, 256)), 0);
        assert!(!tiled.has_dirty_tiles());
    }

    #[test]
    fn test_changed_pixel_marks_its_tile() {
        let mut tiled = TiledSurface::new(256, 256, 128);
        let mut frame = CpuSurface::new(256, 256);
        frame.set_pixel(200, 10, [255, 0, 0, 255]);
        assert_eq!(tiled.replace(frame), 1);
        assert_eq!(tiled.take_dirty_tiles(), vec![TileCoord { x: 1, y: 0 }]);
        assert!(!tiled.has_dirty_tiles());
    }

    #[test]
    fn test_resize_marks_everything() {
        let mut tiled = TiledSurface::new(0, 0, 128);
        tiled.replace(filled(300, 130, [255, 255, 255, 255]));
        assert_eq!(tiled.dirty_tile_count(), 6);
    }

    #[test]
    fn test_tile_data_is_rgba_bytes() {
        let mut tiled = TiledSurface::new(4, 4, 2);
        tiled.replace(filled(4, 4, [1, 2, 3, 4]));
        let data = tiled.get_tile_data(TileCoord { x: 1, y: 1 });
        assert_eq!(data.len(), 16);
        assert_eq!(&data[..4], &[1, 2, 3, 4]);
    }
}
