//! CPU surface holding rasterized editing-surface pixels

use tiny_skia::Pixmap;

/// An 8-bit straight-alpha RGBA CPU surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSurface {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels
    pixels: Vec<[u8; 4]>,
}

impl CpuSurface {
    /// Create a new surface initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; pixel_count],
        }
    }

    /// Copy a premultiplied pixmap, converting to straight alpha
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let pixels = pixmap
            .pixels()
            .iter()
            .map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            pixels,
        }
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = color;
    }

    /// Nearest-neighbour lookup at surface UV, v growing downwards
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        let x = (u.clamp(0.0, 1.0) * self.width as f32) as u32;
        let y = (v.clamp(0.0, 1.0) * self.height as f32) as u32;
        let index = (y.min(self.height - 1) as usize) * (self.width as usize)
            + x.min(self.width - 1) as usize;
        self.pixels[index]
    }

    /// Raw RGBA bytes for upload or encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }
}
