//! Pointer gesture state machine
//!
//! Idle -> Selecting (pointer down on an object or control)
//! Selecting -> Dragging (pointer move while pressed)
//! Dragging -> Idle (pointer up, selection cleared, or forced end)

use glam::Vec2;
use tailor_ipc::Placement;

use crate::constants::{MIN_SCALE, SNAP_ANGLE};
use crate::object::{Control, ObjectHandle, SceneObject};

/// What a gesture does to its object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Move,
    /// Uniform scaling about the center
    Scale,
    /// Rotation about the center with angle snapping
    Rotate,
}

impl From<Control> for GestureMode {
    fn from(control: Control) -> Self {
        if control.is_corner() {
            GestureMode::Scale
        } else {
            GestureMode::Rotate
        }
    }
}

/// Public view of the gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Selecting,
    Dragging,
}

/// Everything captured at pointer down
#[derive(Debug, Clone, Copy)]
pub(crate) struct GestureAnchor {
    pub handle: ObjectHandle,
    pub mode: GestureMode,
    /// Pointer position at pointer down
    pub grab: Vec2,
    /// Object placement at pointer down
    pub start: Placement,
    /// Box center at pointer down
    pub center: Vec2,
}

impl GestureAnchor {
    pub fn new(object: &SceneObject, mode: GestureMode, grab: Vec2) -> Self {
        Self {
            handle: object.handle(),
            mode,
            grab,
            start: *object.placement(),
            center: object.center(),
        }
    }

    /// Placement of the object with the pointer at `pointer`
    pub fn placement_at(&self, object: &SceneObject, pointer: Vec2) -> Placement {
        match self.mode {
            GestureMode::Move => {
                let delta = pointer - self.grab;
                Placement {
                    left: self.start.left + delta.x,
                    top: self.start.top + delta.y,
                    ..self.start
                }
            }
            GestureMode::Scale => {
                let grabbed = (self.grab - self.center).length();
                if grabbed <= f32::EPSILON {
                    return self.start;
                }
                let ratio = (pointer - self.center).length() / grabbed;
                let scale = (self.start.scale_x * ratio).max(MIN_SCALE);
                object.placement_around(self.center, scale, self.start.angle)
            }
            GestureMode::Rotate => {
                let from = (self.grab - self.center).to_angle();
                let to = (pointer - self.center).to_angle();
                let angle = snap_angle(self.start.angle + (to - from).to_degrees());
                object.placement_around(self.center, self.start.scale_x, angle)
            }
        }
    }
}

/// Round to the nearest snap increment and normalize to [0, 360)
pub fn snap_angle(degrees: f32) -> f32 {
    let snapped = (degrees / SNAP_ANGLE).round() * SNAP_ANGLE;
    snapped.rem_euclid(360.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) enum GestureState {
    #[default]
    Idle,
    Selecting(GestureAnchor),
    Dragging(GestureAnchor),
}

impl GestureState {
    pub fn phase(&self) -> GesturePhase {
        match self {
            GestureState::Idle => GesturePhase::Idle,
            GestureState::Selecting(_) => GesturePhase::Selecting,
            GestureState::Dragging(_) => GesturePhase::Dragging,
        }
    }

    pub fn anchor(&self) -> Option<&GestureAnchor> {
        match self {
            GestureState::Idle => None,
            GestureState::Selecting(anchor) | GestureState::Dragging(anchor) => Some(anchor),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}
