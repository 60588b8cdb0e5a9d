//! Coordinate mapping between screen pixels, rays, and surface UV
//!
//! Screen space has y growing downwards, normalized device coordinates have
//! y growing upwards. Mesh UVs have v growing upwards while surface UVs have
//! v growing downwards like surface pixels.

use glam::{Vec2, Vec3};

use crate::camera::OrbitCamera;
use crate::raycast::{MeshHit, Ray};

/// Client-space rectangle of the 3D view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// Client pixel to [-1, 1]², y flipped
pub fn screen_to_normalized(x: f32, y: f32, rect: &ViewRect) -> Vec2 {
    let width = rect.width.max(f32::EPSILON);
    let height = rect.height.max(f32::EPSILON);
    Vec2::new(
        (x - rect.x) / width * 2.0 - 1.0,
        -((y - rect.y) / height * 2.0 - 1.0),
    )
}

/// Inverse of [`screen_to_normalized`]
pub fn normalized_to_screen(ndc: Vec2, rect: &ViewRect) -> Vec2 {
    Vec2::new(
        rect.x + (ndc.x + 1.0) * 0.5 * rect.width,
        rect.y + (1.0 - ndc.y) * 0.5 * rect.height,
    )
}

/// World-space ray through a normalized device coordinate
pub fn ray_from_camera(ndc: Vec2, camera: &OrbitCamera) -> Ray {
    let inverse = camera.view_projection().inverse();
    let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
    let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    Ray::new(near, far - near)
}

/// Surface UV of a mesh hit, v flipped; `None` without UVs or outside [0, 1]²
pub fn intersection_to_surface_uv(hit: &MeshHit) -> Option<Vec2> {
    let uv = hit.uv?;
    let surface = Vec2::new(uv.x, 1.0 - uv.y);
    let inside = (0.0..=1.0).contains(&surface.x) && (0.0..=1.0).contains(&surface.y);
    inside.then_some(surface)
}

/// Surface UV to surface pixels
pub fn surface_uv_to_pixel(uv: Vec2, surface_size: Vec2) -> Vec2 {
    uv * surface_size
}

/// Surface pixels to surface UV
pub fn pixel_to_surface_uv(pixel: Vec2, surface_size: Vec2) -> Vec2 {
    pixel / surface_size.max(Vec2::splat(f32::EPSILON))
}
