//! Per-product placement of the garment model in the scene

use glam::{Mat4, Quat, Vec3};
use tailor_ipc::ProductType;

/// Scale, offset, and Y rotation applied to a product's mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPlacement {
    pub scale: f32,
    pub translation: Vec3,
    pub rotation_y_degrees: f32,
}

impl ModelPlacement {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec3::ZERO,
        rotation_y_degrees: 0.0,
    };

    pub fn for_product(product_type: ProductType) -> Self {
        match product_type {
            ProductType::Jersey => Self {
                scale: 0.0042,
                ..Self::IDENTITY
            },
            ProductType::Sock => Self {
                scale: 0.02,
                translation: Vec3::new(0.0, -0.5, 0.0),
                rotation_y_degrees: 90.0,
            },
        }
    }

    /// Mesh to world transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y_degrees.to_radians()),
            self.translation,
        )
    }
}

impl Default for ModelPlacement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sock_placement() {
        let placement = ModelPlacement::for_product(ProductType::Sock);
        let p = placement.matrix().transform_point3(Vec3::new(0.0, 0.0, 50.0));
        assert!((p - Vec3::new(1.0, -0.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_jersey_scale_only() {
        let placement = ModelPlacement::for_product(ProductType::Jersey);
        let p = placement.matrix().transform_point3(Vec3::new(1000.0, 0.0, 0.0));
        assert!((p - Vec3::new(4.2, 0.0, 0.0)).length() < 1e-4);
    }
}
