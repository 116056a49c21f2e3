//! Edge-triggered input latch
//!
//! Device listeners run outside the tick. They only raise the latch; the frame
//! driver drains it at the start of the next tick so a half-finished tick is
//! never observed or modified.

use std::cell::Cell;
use std::rc::Rc;

/// Shared pending-activate counter (single-threaded, cheap to clone)
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: Rc<Cell<u32>>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one activate (key, tap or click)
    pub fn signal(&self) {
        self.pending.set(self.pending.get().saturating_add(1));
    }

    /// Drain the latch; several signals in one frame collapse into one
    pub fn take(&self) -> bool {
        let pending = self.pending.replace(0);
        if pending > 1 {
            log::debug!("Collapsed {pending} activates into one");
        }
        pending > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals_collapse() {
        let latch = InputLatch::new();
        let listener = latch.clone();
        listener.signal();
        listener.signal();
        listener.signal();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_empty_latch() {
        let latch = InputLatch::new();
        assert!(!latch.take());
    }

    #[test]
    fn test_signal_after_drain_waits_for_next_take() {
        let latch = InputLatch::new();
        latch.signal();
        assert!(latch.take());
        latch.clone().signal();
        assert!(latch.take());
        assert!(!latch.take());
    }
}
