//! Frame-coalesced change notification.
//!
//! State changes during one frame collapse into a single re-render: the
//! notifier holds at most one pending token. Marking while a token is
//! outstanding is a no-op; the binding layer drains the token once per
//! animation frame and re-renders if it was set.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct Inner {
    pending: Cell<bool>,
    /// Invoked when a token is newly armed, so the binding layer can
    /// schedule an animation frame. Not invoked while already pending.
    scheduler: RefCell<Option<Box<dyn Fn()>>>,
}

/// Cloneable handle to the shared notification token.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Rc<Inner>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the frame scheduler callback.
    pub fn set_scheduler(&self, scheduler: impl Fn() + 'static) {
        *self.inner.scheduler.borrow_mut() = Some(Box::new(scheduler));
    }

    /// Mark state as changed. Returns true when this call armed the token
    /// (i.e. a frame needs scheduling); false when one was already pending.
    pub fn notify(&self) -> bool {
        if self.inner.pending.replace(true) {
            return false;
        }
        if let Some(scheduler) = self.inner.scheduler.borrow().as_ref() {
            scheduler();
        }
        true
    }

    /// Drain the token. Called once per animation frame; returns whether
    /// anything changed since the last drain.
    pub fn take(&self) -> bool {
        self.inner.pending.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("pending", &self.is_pending())
            .finish()
    }
}
