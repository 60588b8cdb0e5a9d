//! Shared handle to the design store.

use std::cell::RefCell;
use std::rc::Rc;

use tailor_ipc::{Catalog, StoreAction};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::error::StoreError;
use crate::state::DesignState;

struct DesignStore {
    state: DesignState,
    subscribers: Vec<UnboundedSender<StoreAction>>,
}

/// Cloneable handle injected into every component that reads or writes
/// design state. All access happens on one thread; each dispatch is a
/// complete reducer step.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Rc<RefCell<DesignStore>>,
}

impl StoreHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self::from_state(DesignState::with_catalog(catalog))
    }

    pub fn from_state(state: DesignState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DesignStore {
                state,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Apply an action, logging and discarding it if the reducer rejects it
    pub fn dispatch(&self, action: StoreAction) {
        if let Err(e) = self.try_dispatch(action) {
            debug!("Store action ignored: {}", e);
        }
    }

    /// Apply an action and notify subscribers if it was accepted
    pub fn try_dispatch(&self, action: StoreAction) -> Result<(), StoreError> {
        let mut store = self.inner.borrow_mut();
        store.state.reduce(&action)?;
        debug!("Store action applied: {}", action.name());
        store
            .subscribers
            .retain(|subscriber| subscriber.send(action.clone()).is_ok());
        Ok(())
    }

    /// Receive every accepted action from now on
    pub fn subscribe(&self) -> UnboundedReceiver<StoreAction> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.borrow_mut().subscribers.push(tx);
        rx
    }

    /// Read the current state
    pub fn read<R>(&self, f: impl FnOnce(&DesignState) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DesignState {
        self.read(Clone::clone)
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.inner.borrow();
        f.debug_struct("StoreHandle")
            .field("decorations", &store.state.decorations.len())
            .field("regions", &store.state.colors.len())
            .field("cart_items", &store.state.cart.items.len())
            .finish()
    }
}
