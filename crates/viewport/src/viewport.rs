//! The 3D viewport: camera, mesh, pointer picking, and rendering

use glam::Vec2;
use image::RgbaImage;
use tailor_config::{CaptureConfig, ViewportConfig};
use tailor_ipc::{ClientPoint, PointerPhase, ProductType};
use tailor_surface::CpuSurface;
use tracing::{debug, info};

use crate::camera::OrbitCamera;
use crate::controls::ControlLock;
use crate::error::ViewportError;
use crate::mapper::{ViewRect, intersection_to_surface_uv, ray_from_camera, screen_to_normalized};
use crate::placement::ModelPlacement;
use crate::raycast::{MeshData, Ray, raycast_mesh};
use crate::render::render_mesh;

/// A pointer sample that landed on the mesh, ready for the editing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePointer {
    pub uv: Vec2,
    pub phase: PointerPhase,
    pub client: ClientPoint,
}

/// What a pointer sample on the 3D view amounts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Forward to the editing surface
    Hit(SurfacePointer),
    /// Nothing to forward
    Miss,
    /// A press that started on the mesh was released off it
    Released,
}

pub struct Viewport {
    config: ViewportConfig,
    capture: CaptureConfig,
    camera: OrbitCamera,
    rect: ViewRect,
    mesh: Option<MeshData>,
    placement: ModelPlacement,
    lock: ControlLock,
    /// A press began on the mesh and has not been released
    pressed: bool,
}

impl Viewport {
    pub fn new(config: ViewportConfig, capture: CaptureConfig) -> Self {
        let rect = ViewRect::sized(config.width, config.height);
        let mut camera = OrbitCamera::from_config(&config);
        camera.aspect = rect.aspect_ratio();
        Self {
            config,
            capture,
            camera,
            rect,
            mesh: None,
            placement: ModelPlacement::IDENTITY,
            lock: ControlLock::default(),
            pressed: false,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn rect(&self) -> ViewRect {
        self.rect
    }

    /// Move or resize the view within the client area
    pub fn set_rect(&mut self, rect: ViewRect) {
        self.rect = rect;
        self.camera.aspect = rect.aspect_ratio();
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// Install the primary mesh with the product's placement
    pub fn set_mesh(&mut self, mesh: MeshData, product_type: ProductType) {
        self.set_mesh_with_placement(mesh, ModelPlacement::for_product(product_type));
    }

    pub fn set_mesh_with_placement(&mut self, mesh: MeshData, placement: ModelPlacement) {
        info!(
            "Mesh set: {} triangles, scale {}",
            mesh.triangle_count(),
            placement.scale
        );
        self.mesh = Some(mesh);
        self.placement = placement;
        self.pressed = false;
    }

    pub fn placement(&self) -> ModelPlacement {
        self.placement
    }

    /// Re-place the installed mesh, e.g. for another product type
    pub fn set_placement(&mut self, placement: ModelPlacement) {
        self.placement = placement;
        self.pressed = false;
    }

    pub fn lock(&self) -> ControlLock {
        self.lock
    }

    pub fn set_lock(&mut self, lock: ControlLock) {
        if lock != self.lock {
            debug!("Camera controls locked: {}", lock.is_locked());
        }
        self.lock = lock;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    // ========================================================================
    // Camera controls
    // ========================================================================

    /// Returns whether the camera moved
    pub fn orbit(&mut self, delta: Vec2) -> bool {
        if self.lock.is_locked() {
            return false;
        }
        self.camera.orbit(delta);
        true
    }

    pub fn pan(&mut self, delta: Vec2) -> bool {
        if self.lock.is_locked() {
            return false;
        }
        self.camera.pan(delta);
        true
    }

    pub fn zoom(&mut self, lines: f32) -> bool {
        if self.lock.is_locked() {
            return false;
        }
        self.camera.zoom(lines);
        true
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    // ========================================================================
    // Picking
    // ========================================================================

    /// Surface UV under a client position, if it is on the mesh
    pub fn pick(&self, x: f32, y: f32) -> Option<Vec2> {
        let mesh = self.mesh.as_ref()?;
        let world = ray_from_camera(screen_to_normalized(x, y, &self.rect), &self.camera);

        // Cast in mesh space so the placement transform needs no baking
        let inverse = self.placement.matrix().inverse();
        let local = Ray::new(
            inverse.transform_point3(world.origin),
            inverse.transform_vector3(world.direction),
        );
        raycast_mesh(&local, mesh).and_then(|hit| intersection_to_surface_uv(&hit))
    }

    /// Interpret a pointer sample on the 3D view.
    ///
    /// Moves and releases only count while a press that started on the mesh
    /// is active.
    pub fn pointer(&mut self, phase: PointerPhase, x: f32, y: f32) -> PointerOutcome {
        let client = ClientPoint::new(x, y);
        let hit = |uv| PointerOutcome::Hit(SurfacePointer { uv, phase, client });

        match phase {
            PointerPhase::Down => match self.pick(x, y) {
                Some(uv) => {
                    self.pressed = true;
                    hit(uv)
                }
                None => PointerOutcome::Miss,
            },
            PointerPhase::Move => {
                if !self.pressed {
                    return PointerOutcome::Miss;
                }
                self.pick(x, y).map_or(PointerOutcome::Miss, hit)
            }
            PointerPhase::Up => {
                if !std::mem::take(&mut self.pressed) {
                    return PointerOutcome::Miss;
                }
                self.pick(x, y).map_or(PointerOutcome::Released, hit)
            }
        }
    }

    /// Forget an active press, e.g. when the pointer leaves the view
    pub fn cancel_press(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render at the view size
    pub fn render(&self, texture: &CpuSurface) -> Result<RgbaImage, ViewportError> {
        self.render_sized(texture, self.rect.width as u32, self.rect.height as u32)
    }

    pub(crate) fn render_sized(
        &self,
        texture: &CpuSurface,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, ViewportError> {
        let mesh = self.mesh.as_ref().ok_or(ViewportError::NoMesh)?;
        let mut camera = self.camera.clone();
        camera.aspect = width as f32 / height.max(1) as f32;
        render_mesh(
            &camera,
            mesh,
            self.placement.matrix(),
            texture,
            width,
            height,
            self.config.clear_color,
        )
    }

    pub(crate) fn capture_config(&self) -> &CaptureConfig {
        &self.capture
    }

    pub(crate) fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("rect", &self.rect)
            .field("has_mesh", &self.mesh.is_some())
            .field("lock", &self.lock)
            .field("pressed", &self.pressed)
            .finish()
    }
}
