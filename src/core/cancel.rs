//! Cooperative cancellation for bulk traversals
//!
//! The engine never decides on its own to stop. Bulk entry points take a
//! caller-supplied `FnMut() -> bool` and poll it every
//! [`CANCEL_CHECK_INTERVAL`] items.

use crate::core::error::{EngineError, EngineResult};

/// Number of items processed between two cancellation polls
pub const CANCEL_CHECK_INTERVAL: usize = 256;

/// Polls a cancellation callback at a coarse grain
pub struct CancelCheck<F> {
    check: F,
    interval: usize,
    counter: usize,
}

impl<F: FnMut() -> bool> CancelCheck<F> {
    pub fn new(check: F) -> Self {
        Self::with_interval(check, CANCEL_CHECK_INTERVAL)
    }

    /// Poll every `interval` items (an interval of 0 is treated as 1)
    pub fn with_interval(check: F, interval: usize) -> Self {
        Self {
            check,
            interval: interval.max(1),
            counter: 0,
        }
    }

    /// Count one item; returns `Cancelled` if the callback fired on this poll
    #[inline]
    pub fn tick(&mut self) -> EngineResult<()> {
        self.counter += 1;
        if self.counter >= self.interval {
            self.counter = 0;
            if (self.check)() {
                log::debug!("Bulk traversal cancelled by caller");
                return Err(EngineError::Cancelled);
            }
        }
        Ok(())
    }
}

/// Cancellation callback that never fires
pub fn never_cancelled() -> bool {
    false
}
