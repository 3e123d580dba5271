use crate::{
    core::viewport::Viewport,
    lock::store::ViewportStore,
    Result,
};

/// Result of a lock toggle; the UI label must follow the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition {
    /// The current viewport was persisted
    Locked,
    /// The persisted viewport was cleared
    Unlocked,
}

/// Lock-button label matching the current state: clicking "Lock" locks,
/// clicking "Unlock" unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockLabel {
    Lock,
    Unlock,
}

/// Owns lock/unlock state, derived entirely from whether a viewport is
/// persisted in the store. Transitions only happen through `toggle` or a
/// programmatic `clear` on the store.
pub struct LockController {
    store: ViewportStore,
}

impl LockController {
    pub fn new(store: ViewportStore) -> Self {
        Self { store }
    }

    /// Locked iff a viewport is currently persisted
    pub fn is_locked(&self) -> bool {
        self.store.is_present()
    }

    /// The persisted viewport, if any (malformed entries read as absent)
    pub fn locked_viewport(&self) -> Option<Viewport> {
        self.store.load()
    }

    /// Label the lock button should carry right now
    pub fn label(&self) -> LockLabel {
        if self.is_locked() {
            LockLabel::Unlock
        } else {
            LockLabel::Lock
        }
    }

    /// Flip the lock state. Always valid: locking persists `current`,
    /// unlocking clears the store. The caller cancels any active countdown
    /// on unlock.
    pub fn toggle(&mut self, current: &Viewport) -> Result<LockTransition> {
        if self.is_locked() {
            log::info!("clearing saved location and zoom; switching to 'lock'");
            self.store.clear();
            Ok(LockTransition::Unlocked)
        } else {
            log::info!(
                "saving location ({:.4}, {:.4}) at zoom {}; switching to 'unlock'",
                current.center.lat,
                current.center.lng,
                current.zoom
            );
            self.store.save(current)?;
            Ok(LockTransition::Locked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        lock::store::{MemoryStorage, ViewportStore},
    };

    fn controller() -> LockController {
        LockController::new(ViewportStore::new(Box::new(MemoryStorage::new())))
    }

    #[test]
    fn test_toggle_locks_and_unlocks() {
        let mut controller = controller();
        let viewport = Viewport::new(LatLng::new(40.0, -98.0), 5);

        assert!(!controller.is_locked());
        assert_eq!(controller.label(), LockLabel::Lock);

        let transition = controller.toggle(&viewport).unwrap();
        assert_eq!(transition, LockTransition::Locked);
        assert!(controller.is_locked());
        assert_eq!(controller.locked_viewport(), Some(viewport));
        assert_eq!(controller.label(), LockLabel::Unlock);

        let transition = controller.toggle(&viewport).unwrap();
        assert_eq!(transition, LockTransition::Unlocked);
        assert!(!controller.is_locked());
        assert_eq!(controller.locked_viewport(), None);
    }

    #[test]
    fn test_double_toggle_is_idempotent() {
        let mut controller = controller();
        let first = Viewport::new(LatLng::new(35.0, 139.0), 9);
        controller.toggle(&first).unwrap();

        // Toggling twice from locked returns to the original persisted state
        let live = Viewport::new(LatLng::new(36.0, 140.0), 10);
        controller.toggle(&live).unwrap();
        controller.toggle(&first).unwrap();
        assert_eq!(controller.locked_viewport(), Some(first));
    }
}
