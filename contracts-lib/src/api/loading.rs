//! In-flight request tracking

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Counts requests in flight so a UI can show a global loading indicator.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    active: Arc<AtomicUsize>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while at least one request is running.
    pub fn is_loading(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Marks a request as started; it ends when the guard drops.
    pub fn start(&self) -> LoadingGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            active: Arc::clone(&self.active),
        }
    }

    /// Forces the indicator on (one request) or off (none).
    pub fn set_loading(&self, loading: bool) {
        self.active.store(usize::from(loading), Ordering::SeqCst);
    }
}

/// Ends one tracked request when dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        // Never below zero, even after `set_loading(false)`.
        let _ = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_requests() {
        let tracker = LoadingTracker::new();
        let first = tracker.start();
        let second = tracker.clone().start();
        assert_eq!(tracker.active(), 2);
        drop(first);
        assert!(tracker.is_loading());
        drop(second);
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_forced_off_does_not_underflow() {
        let tracker = LoadingTracker::new();
        let guard = tracker.start();
        tracker.set_loading(false);
        drop(guard);
        assert_eq!(tracker.active(), 0);
        tracker.set_loading(true);
        assert!(tracker.is_loading());
    }
}
