//! Orbit camera
//!
//! Spherical coordinates around a target point:
//! - orbit: yaw around Y, pitch from the horizontal
//! - pan: moves the target in the camera's view plane
//! - zoom: dolly towards the target within the configured range

use glam::{Mat4, Vec2, Vec3};
use tailor_config::ViewportConfig;

/// Pitch limit just short of straight up or down
const MAX_PITCH: f32 = 1.5;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Saved camera position, restored after a capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (yaw) in radians
    pub yaw: f32,
    /// Vertical angle (pitch) in radians
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width over height of the viewport
    pub aspect: f32,
    /// Orbit sensitivity (radians per pixel)
    pub orbit_sensitivity: f32,
    /// Pan sensitivity (units per pixel, scaled by distance)
    pub pan_sensitivity: f32,
    /// Zoom sensitivity (distance units per scroll line)
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    default_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl OrbitCamera {
    /// Camera at the default pose: on +Z looking at the origin
    pub fn from_config(config: &ViewportConfig) -> Self {
        let distance = config
            .default_distance
            .clamp(config.min_distance, config.max_distance);
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees: config.fov_degrees,
            aspect: config.aspect_ratio(),
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.002,
            zoom_sensitivity: 1.0,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            default_distance: distance,
        }
    }

    /// Calculate camera position from orbit parameters
    pub fn calculate_position(&self) -> Vec3 {
        let horizontal_distance = self.distance * self.pitch.cos();
        let y = self.distance * self.pitch.sin();
        let x = horizontal_distance * self.yaw.sin();
        let z = horizontal_distance * self.yaw.cos();

        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.calculate_position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect.max(f32::EPSILON),
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Rotate around the target by a pointer delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.orbit_sensitivity;
        self.pitch = (self.pitch - delta.y * self.orbit_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the target in the view plane by a pointer delta in pixels
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.calculate_position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        // Scale pan by distance so it feels consistent at different zoom levels
        let pan_scale = self.pan_sensitivity * self.distance;
        self.target += (-right * delta.x + up * delta.y) * pan_scale;
    }

    /// Dolly by scroll lines; positive moves closer
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * self.zoom_sensitivity)
            .clamp(self.min_distance, self.max_distance);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            target: self.target,
            distance: self.distance,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.target = pose.target;
        self.distance = pose.distance.clamp(self.min_distance, self.max_distance);
        self.yaw = pose.yaw;
        self.pitch = pose.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Reset to default view
    pub fn reset(&mut self) {
        self.target = Vec3::ZERO;
        self.distance = self.default_distance;
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}
