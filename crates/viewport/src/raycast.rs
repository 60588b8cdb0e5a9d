//! Ray-mesh intersection for picking on the 3D model.
//!
//! Ray-triangle tests use the Moller-Trumbore algorithm; UVs and normals are
//! interpolated at the closest hit.

use glam::{Vec2, Vec3};

use crate::error::ViewportError;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f32,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f32,
}

/// Moller-Trumbore ray-triangle intersection. Both faces are hit.
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray parallel to the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Interpolate a Vec3 attribute using barycentric coordinates.
pub fn interpolate_vec3(v0: Vec3, v1: Vec3, v2: Vec3, u: f32, v: f32) -> Vec3 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// Interpolate a Vec2 attribute (like UVs) using barycentric coordinates.
pub fn interpolate_vec2(v0: Vec2, v1: Vec2, v2: Vec2, u: f32, v: f32) -> Vec2 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// Closest intersection of a ray with a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Hit position in mesh space
    pub point: Vec3,
    pub distance: f32,
    pub face: u32,
    /// (w, u, v) weights of the triangle's vertices
    pub barycentric: Vec3,
    pub normal: Vec3,
    /// Interpolated texture coordinate, `None` for meshes without UVs
    pub uv: Option<Vec2>,
}

/// Triangle mesh handed over by the embedder.
///
/// UVs follow the texture-space convention with v growing upwards.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
    /// Vertex UVs (same length as positions, or empty if no UVs)
    pub uvs: Vec<Vec2>,
    /// Vertex normals (same length as positions, or empty to use face normals)
    pub normals: Vec<Vec3>,
}

impl MeshData {
    /// Validate buffers and build a mesh
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        uvs: Vec<Vec2>,
        normals: Vec<Vec3>,
    ) -> Result<Self, ViewportError> {
        if indices.len() % 3 != 0 {
            return Err(ViewportError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(ViewportError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                index,
                positions.len()
            )));
        }
        if !uvs.is_empty() && uvs.len() != positions.len() {
            return Err(ViewportError::InvalidMesh("uv count differs from vertex count".into()));
        }
        if !normals.is_empty() && normals.len() != positions.len() {
            return Err(ViewportError::InvalidMesh(
                "normal count differs from vertex count".into(),
            ));
        }
        Ok(Self {
            positions,
            indices,
            uvs,
            normals,
        })
    }

    /// Axis-aligned quad in the XY plane centered on the origin, facing +Z,
    /// with UV (0, 0) at the bottom-left corner
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(-hw, hh, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            normals: vec![Vec3::Z; 4],
        }
    }

    /// Get the number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the vertex indices for a triangle
    pub fn triangle_indices(&self, tri_index: usize) -> (usize, usize, usize) {
        let base = tri_index * 3;
        (
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        )
    }

    /// Get the vertex positions for a triangle
    pub fn triangle_positions(&self, tri_index: usize) -> (Vec3, Vec3, Vec3) {
        let (i0, i1, i2) = self.triangle_indices(tri_index);
        (self.positions[i0], self.positions[i1], self.positions[i2])
    }

    /// Vertex UVs of a triangle, zero when the mesh has none
    pub fn triangle_uvs(&self, tri_index: usize) -> (Vec2, Vec2, Vec2) {
        if self.uvs.is_empty() {
            return (Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        }
        let (i0, i1, i2) = self.triangle_indices(tri_index);
        (self.uvs[i0], self.uvs[i1], self.uvs[i2])
    }

    /// Normal at barycentric (u, v) of a triangle
    pub fn normal_at(&self, tri_index: usize, u: f32, v: f32) -> Vec3 {
        if self.normals.is_empty() {
            let (v0, v1, v2) = self.triangle_positions(tri_index);
            return (v1 - v0).cross(v2 - v0).normalize_or_zero();
        }
        let (i0, i1, i2) = self.triangle_indices(tri_index);
        interpolate_vec3(self.normals[i0], self.normals[i1], self.normals[i2], u, v)
            .normalize_or_zero()
    }
}

/// Cast a ray (in mesh space) and return the closest hit.
pub fn raycast_mesh(ray: &Ray, mesh: &MeshData) -> Option<MeshHit> {
    let mut closest: Option<(TriangleHit, usize)> = None;

    // Brute force over all triangles
    for tri_index in 0..mesh.triangle_count() {
        let (v0, v1, v2) = mesh.triangle_positions(tri_index);
        if let Some(hit) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) {
            if closest.is_none_or(|(prev, _)| hit.t < prev.t) {
                closest = Some((hit, tri_index));
            }
        }
    }

    closest.map(|(hit, tri_index)| {
        let uv = (!mesh.uvs.is_empty()).then(|| {
            let (uv0, uv1, uv2) = mesh.triangle_uvs(tri_index);
            interpolate_vec2(uv0, uv1, uv2, hit.u, hit.v)
        });
        MeshHit {
            point: ray.at(hit.t),
            distance: hit.t,
            face: tri_index as u32,
            barycentric: Vec3::new(1.0 - hit.u - hit.v, hit.u, hit.v),
            normal: mesh.normal_at(tri_index, hit.u, hit.v),
            uv,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_triangle_hit() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let origin = Vec3::new(0.25, 0.25, 1.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);

        let hit = ray_triangle_intersection(origin, dir, v0, v1, v2).unwrap();
        assert!((hit.t - 1.0).abs() < EPSILON);
        assert!((hit.u - 0.25).abs() < EPSILON);
        assert!((hit.v - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_ray_triangle_behind() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let origin = Vec3::new(0.25, 0.25, 1.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);

        assert!(ray_triangle_intersection(origin, dir, v0, v1, v2).is_none());
    }

    #[test]
    fn test_plane_hit_interpolates_uv() {
        let mesh = MeshData::plane(4.0, 4.0);
        let ray = Ray::new(Vec3::new(1.0, 1.0, 5.0), Vec3::NEG_Z);
        let hit = raycast_mesh(&ray, &mesh).unwrap();
        let uv = hit.uv.unwrap();
        assert!((uv - Vec2::new(0.75, 0.75)).length() < 1e-5);
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_closest_triangle_wins() {
        let mut mesh = MeshData::plane(2.0, 2.0);
        let offset = mesh.positions.len() as u32;
        mesh.positions
            .extend(MeshData::plane(2.0, 2.0).positions.iter().map(|p| *p + Vec3::Z));
        mesh.uvs.extend([Vec2::ZERO; 4]);
        mesh.normals.extend([Vec3::Z; 4]);
        mesh.indices
            .extend([0, 1, 2, 0, 2, 3].iter().map(|i| i + offset));

        let hit = raycast_mesh(&Ray::new(Vec3::new(0.1, 0.1, 5.0), Vec3::NEG_Z), &mesh).unwrap();
        assert!(hit.face >= 2);
        assert!((hit.point.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_mesh_rejected() {
        assert!(MeshData::new(vec![Vec3::ZERO; 3], vec![0, 1], vec![], vec![]).is_err());
        assert!(MeshData::new(vec![Vec3::ZERO; 3], vec![0, 1, 3], vec![], vec![]).is_err());
        assert!(MeshData::new(vec![Vec3::ZERO; 3], vec![0, 1, 2], vec![Vec2::ZERO], vec![]).is_err());
        assert!(MeshData::new(vec![Vec3::ZERO; 3], vec![0, 1, 2], vec![], vec![]).is_ok());
    }
}
