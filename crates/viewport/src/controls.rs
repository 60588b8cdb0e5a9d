//! Camera control lock
//!
//! Orbit, pan, and zoom stay disabled while a decoration is being placed,
//! dragged, or is selected.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlLock {
    pub text_placement: bool,
    pub image_placement: bool,
    pub dragging: bool,
    pub selection: bool,
}

impl ControlLock {
    pub fn is_locked(&self) -> bool {
        self.text_placement || self.image_placement || self.dragging || self.selection
    }

    pub fn placing(&self) -> bool {
        self.text_placement || self.image_placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_flag_locks() {
        assert!(!ControlLock::default().is_locked());
        let lock = ControlLock {
            selection: true,
            ..Default::default()
        };
        assert!(lock.is_locked());
        assert!(!lock.placing());
    }
}
