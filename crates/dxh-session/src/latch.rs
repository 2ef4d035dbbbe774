//! Single-flight guard for submissions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Busy flag shared by every handle to the same session.
///
/// Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct SubmitLatch {
    busy: Arc<AtomicBool>,
}

impl SubmitLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latch, or `None` while a submission is in flight.
    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one submission; releases the latch on drop.
#[derive(Debug)]
#[must_use = "the latch is released as soon as the permit is dropped"]
pub struct SubmitPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let latch = SubmitLatch::new();
        let permit = latch.try_acquire().unwrap();
        assert!(latch.is_busy());
        assert!(latch.clone().try_acquire().is_none());

        drop(permit);
        assert!(!latch.is_busy());
        assert!(latch.try_acquire().is_some());
    }
}
