//! Events emitted by the editing surface

use crate::gesture::GestureMode;
use crate::object::ObjectHandle;

/// Structural and interaction events, delivered in emission order on a
/// single channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// An object entered the scene
    ObjectAdded { handle: ObjectHandle },
    /// Per-frame progress of a gesture
    ObjectTransforming { handle: ObjectHandle, mode: GestureMode },
    /// A modification finished and should be persisted
    ObjectSettled { handle: ObjectHandle },
    /// An object left the scene
    ObjectRemoved { handle: ObjectHandle, id: Option<String> },
    /// The active object changed
    SelectionChanged { handle: Option<ObjectHandle> },
}
