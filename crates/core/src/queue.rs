//! Pending-input FIFO shared between input listeners and the driver.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glyph_loop_types::InputEvent;

/// Single-threaded FIFO of captured input.
///
/// Clones share the same storage: listeners hold a clone and append, the
/// [`crate::SimulationDriver`] owns the original and drains it once per step.
/// The handle is `!Send`, so producers and the consumer are guaranteed to run
/// on the same thread.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    inner: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Take every pending event, oldest first, leaving the queue empty.
    ///
    /// The borrow is released before the batch is returned, so producers may
    /// keep pushing while the caller works through it.
    pub fn drain(&self) -> VecDeque<InputEvent> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    /// Copy of the pending events without consuming them.
    pub fn snapshot(&self) -> Vec<InputEvent> {
        self.inner.borrow().iter().copied().collect()
    }
}
