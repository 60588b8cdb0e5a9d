//! Software rendering of the textured garment mesh
//!
//! Perspective-correct texture mapping with a depth buffer and double-sided
//! Lambert lighting from an ambient term plus two directional lights.

use glam::{Mat4, Vec2, Vec3, Vec4};
use image::RgbaImage;
use tailor_surface::CpuSurface;

use crate::camera::OrbitCamera;
use crate::error::ViewportError;
use crate::raycast::MeshData;

const AMBIENT: f32 = 0.8;
const KEY_LIGHT: (Vec3, f32) = (Vec3::new(1.0, 2.0, 1.0), 0.6);
const FILL_LIGHT: (Vec3, f32) = (Vec3::new(-1.0, 2.0, -1.0), 0.3);

/// Clip-space w below which a vertex counts as behind the camera
const MIN_W: f32 = 1e-4;

/// Brightness of a surface with the given world normal, both faces lit alike
pub fn lambert(normal: Vec3) -> f32 {
    let n = normal.normalize_or_zero();
    let key = n.dot(KEY_LIGHT.0.normalize()).abs() * KEY_LIGHT.1;
    let fill = n.dot(FILL_LIGHT.0.normalize()).abs() * FILL_LIGHT.1;
    AMBIENT + key + fill
}

struct ScreenVertex {
    /// Pixel position
    position: Vec2,
    /// NDC depth
    depth: f32,
    inv_w: f32,
    uv: Vec2,
}

/// Render `mesh` placed by `model` and textured with `texture`.
///
/// Texture lookups flip v so mesh UVs address the surface the right way up.
pub fn render_mesh(
    camera: &OrbitCamera,
    mesh: &MeshData,
    model: Mat4,
    texture: &CpuSurface,
    width: u32,
    height: u32,
    clear_color: [u8; 4],
) -> Result<RgbaImage, ViewportError> {
    if width == 0 || height == 0 {
        return Err(ViewportError::EmptyViewport { width, height });
    }

    let mut image = RgbaImage::from_pixel(width, height, image::Rgba(clear_color));
    let mut depth = vec![f32::INFINITY; (width * height) as usize];

    let clip_from_model = camera.view_projection() * model;
    let normal_matrix = model.inverse().transpose();
    let size = Vec2::new(width as f32, height as f32);

    for tri in 0..mesh.triangle_count() {
        let (p0, p1, p2) = mesh.triangle_positions(tri);
        let (uv0, uv1, uv2) = mesh.triangle_uvs(tri);

        let Some(vertices) = [(p0, uv0), (p1, uv1), (p2, uv2)]
            .map(|(p, uv)| project(clip_from_model, p, uv, size))
            .into_iter()
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };

        // Flat shading from the centroid normal
        let normal = normal_matrix
            .transform_vector3(mesh.normal_at(tri, 1.0 / 3.0, 1.0 / 3.0))
            .normalize_or_zero();
        let shade = lambert(normal);

        raster_triangle(&vertices, shade, texture, &mut image, &mut depth);
    }

    Ok(image)
}

fn project(clip_from_model: Mat4, position: Vec3, uv: Vec2, size: Vec2) -> Option<ScreenVertex> {
    let clip = clip_from_model * Vec4::new(position.x, position.y, position.z, 1.0);
    if clip.w < MIN_W {
        return None;
    }
    let inv_w = 1.0 / clip.w;
    let ndc = clip.truncate() * inv_w;
    Some(ScreenVertex {
        position: Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y),
        depth: ndc.z,
        inv_w,
        uv,
    })
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

fn raster_triangle(
    v: &[ScreenVertex],
    shade: f32,
    texture: &CpuSurface,
    image: &mut RgbaImage,
    depth: &mut [f32],
) {
    let (a, b, c) = (&v[0], &v[1], &v[2]);
    let area = edge(a.position, b.position, c.position);
    if area.abs() < f32::EPSILON {
        return;
    }

    let (width, height) = image.dimensions();
    let min = a.position.min(b.position).min(c.position).floor().max(Vec2::ZERO);
    let max = a
        .position
        .max(b.position)
        .max(c.position)
        .ceil()
        .min(Vec2::new(width as f32 - 1.0, height as f32 - 1.0));
    if min.x > max.x || min.y > max.y {
        return;
    }

    for y in min.y as u32..=max.y as u32 {
        for x in min.x as u32..=max.x as u32 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            // Barycentric weights, valid for either winding
            let w0 = edge(b.position, c.position, p) / area;
            let w1 = edge(c.position, a.position, p) / area;
            let w2 = edge(a.position, b.position, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let z = w0 * a.depth + w1 * b.depth + w2 * c.depth;
            let index = (y * width + x) as usize;
            if !(0.0..=1.0).contains(&z) || z >= depth[index] {
                continue;
            }
            depth[index] = z;

            let inv_w = w0 * a.inv_w + w1 * b.inv_w + w2 * c.inv_w;
            let uv = (a.uv * (w0 * a.inv_w) + b.uv * (w1 * b.inv_w) + c.uv * (w2 * c.inv_w)) / inv_w;
            let texel = texture.sample(uv.x, 1.0 - uv.y);

            let lit = |channel: u8| (channel as f32 * shade).round().min(255.0) as u8;
            image.put_pixel(
                x,
                y,
                image::Rgba([lit(texel[0]), lit(texel[1]), lit(texel[2]), 255]),
            );
        }
    }
}
