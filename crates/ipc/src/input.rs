//! Pointer input types shared by the viewport and the editing surface.

use serde::{Deserialize, Serialize};

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    #[serde(rename = "mousedown")]
    Down,
    #[serde(rename = "mousemove")]
    Move,
    #[serde(rename = "mouseup")]
    Up,
}

/// Raw client-space pointer position, carried alongside synthetic events.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientPoint {
    pub x: f32,
    pub y: f32,
}

impl ClientPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which view is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Textured model in the 3D viewport
    #[default]
    Model,
    /// Flat editing surface
    Surface,
}
