//! Explicit frame-callback scheduling.
//!
//! Mirrors `requestAnimationFrame`: a request fires on the next frame
//! only, exactly once. Anything that wants another frame asks again from
//! inside its callback, which lands in the following frame because the
//! current one has already been drained.

use std::collections::BTreeMap;

/// Ticket for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Clone)]
pub struct FrameScheduler<K> {
    pending: BTreeMap<u64, K>,
    next_handle: u64,
    total_requests: u64,
    frames: u64,
}

impl<K: Clone> FrameScheduler<K> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_handle: 0,
            total_requests: 0,
            frames: 0,
        }
    }

    /// Ask for `owner` to be called back on the next frame.
    pub fn request(&mut self, owner: K) -> FrameHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.total_requests += 1;
        self.pending.insert(handle, owner);
        FrameHandle(handle)
    }

    /// Withdraw a request. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle.0).is_some()
    }

    /// Start a frame: consume every pending request and return their
    /// owners in request order.
    pub fn begin_frame(&mut self) -> Vec<K> {
        self.frames += 1;
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Requests waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Requests made since creation, fired or not.
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Frames begun since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drop every pending request. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

impl<K: Clone> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fires_once() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request("a");
        scheduler.request("b");
        assert_eq!(scheduler.pending(), 2);

        assert_eq!(scheduler.begin_frame(), vec!["a", "b"]);
        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.begin_frame().is_empty());
        assert_eq!(scheduler.frames(), 2);
    }

    #[test]
    fn test_request_during_frame_lands_in_next() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request(1);
        for owner in scheduler.begin_frame() {
            scheduler.request(owner + 1);
        }
        assert_eq!(scheduler.begin_frame(), vec![2]);
        assert_eq!(scheduler.total_requests(), 2);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request('a');
        let b = scheduler.request('b');
        assert!(scheduler.cancel(a));
        assert!(!scheduler.cancel(a));
        assert_eq!(scheduler.begin_frame(), vec!['b']);
        assert!(!scheduler.cancel(b));
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = FrameScheduler::new();
        scheduler.request(());
        scheduler.request(());
        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.total_requests(), 2);
    }
}
