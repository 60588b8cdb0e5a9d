//! Pointer handling: hit-testing and the gesture state machine

use glam::Vec2;
use tailor_ipc::{ClientPoint, PointerPhase};
use tracing::debug;

use super::EditingSurface;
use crate::events::SurfaceEvent;
use crate::gesture::{GestureAnchor, GestureMode, GestureState};
use crate::object::ObjectHandle;

impl EditingSurface {
    /// Feed one pointer sample at surface UV.
    ///
    /// `client` is the originating screen position when the sample was
    /// synthesized from a 3D hit.
    pub fn handle_interaction(&mut self, uv: Vec2, phase: PointerPhase, client: Option<ClientPoint>) {
        if !uv.is_finite() {
            debug!("Pointer sample ignored: non-finite uv");
            return;
        }
        let point = uv * self.size();
        if let Some(client) = client {
            debug!(
                "Pointer {:?} at ({:.1}, {:.1}) from client ({:.0}, {:.0})",
                phase, point.x, point.y, client.x, client.y
            );
        }

        match phase {
            PointerPhase::Down => self.pointer_down(point),
            PointerPhase::Move => self.pointer_move(point),
            PointerPhase::Up => self.pointer_up(),
        }
    }

    /// Force the gesture back to Idle, settling a drag in progress
    pub fn end_gesture(&mut self) {
        let previous = std::mem::take(&mut self.gesture);
        if let GestureState::Dragging(anchor) = previous {
            debug!("Gesture on {:?} ended", anchor.handle);
            self.settle(anchor.handle);
        }
    }

    /// Top-most object containing `point`
    pub fn hit_test(&self, point: Vec2) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.contains(point))
            .map(|o| o.handle())
    }

    fn pointer_down(&mut self, point: Vec2) {
        // A missing up leaves a stale gesture behind
        self.end_gesture();

        let control = self
            .active
            .and_then(|handle| self.object(handle))
            .and_then(|object| object.control_at(point).map(|control| (object, control)));
        if let Some((object, control)) = control {
            let anchor = GestureAnchor::new(object, GestureMode::from(control), point);
            debug!("Control {:?} grabbed on {:?}", control, anchor.handle);
            self.gesture = GestureState::Selecting(anchor);
            return;
        }

        let Some(handle) = self.hit_test(point) else {
            self.clear_selection();
            return;
        };
        self.set_active(handle);
        if let Some(object) = self.object(handle) {
            self.gesture = GestureState::Selecting(GestureAnchor::new(object, GestureMode::Move, point));
        }
    }

    fn pointer_move(&mut self, point: Vec2) {
        let Some(anchor) = self.gesture.anchor().copied() else {
            return;
        };
        let Some(object) = self.object(anchor.handle) else {
            self.gesture = GestureState::Idle;
            return;
        };
        let placement = anchor.placement_at(object, point);

        if let Some(object) = self.object_mut(anchor.handle) {
            object.placement = placement;
            object.unsynced = true;
        }
        self.gesture = GestureState::Dragging(anchor);
        self.touch();
        self.emit(SurfaceEvent::ObjectTransforming {
            handle: anchor.handle,
            mode: anchor.mode,
        });
    }

    fn pointer_up(&mut self) {
        match std::mem::take(&mut self.gesture) {
            GestureState::Dragging(anchor) => self.settle(anchor.handle),
            GestureState::Selecting(_) | GestureState::Idle => {}
        }
    }
}
