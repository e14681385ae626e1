//! PizzaFun Pointer Tracker
//!
//! Holds the last observed pointer position, scroll progress and
//! viewport size for one mounted page, and fans changes out to the
//! components bound to them.
//!
//! The tracker is explicitly owned: there is no process-wide pointer
//! state. Consumers call [`PointerTracker::subscribe`] and keep the
//! returned [`PointerSubscription`] for as long as they are mounted;
//! dropping it deregisters the consumer. Input arrives either directly
//! through [`PointerTracker::dispatch`] or from a [`PointerSource`]
//! drained with [`PointerTracker::pump`].
//!
//! Everything here is single-threaded (`Rc`/`RefCell`), matching the
//! cooperative UI thread it models.

pub mod source;

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use pizzafun_common::clock::TimestampNs;
use pizzafun_page_model::event::{EventKind, InputEvent};
use pizzafun_page_model::geometry::{Point2D, ViewportSize};

pub use source::{PointerSource, ScriptedSource};

/// Last observed pointer position in viewport coordinates.
///
/// Overwritten on every pointer move, never queued.
pub type PointerSample = Point2D;

/// Everything observable about the pointer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerUpdate {
    /// Last pointer position.
    pub sample: PointerSample,
    /// Whether the pointer is over the page.
    pub present: bool,
    /// Scroll progress in `[0, 1]`.
    pub scroll_progress: f64,
    /// Current viewport size.
    pub viewport: ViewportSize,
}

#[derive(Debug)]
struct TrackerState {
    update: PointerUpdate,
    generation: u64,
    events_applied: u64,
    subscribers: BTreeSet<u64>,
    next_subscriber: u64,
}

/// The pointer tracker for one mounted page.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    state: Rc<RefCell<TrackerState>>,
}

impl PointerTracker {
    /// Create a tracker for a viewport of the given size.
    ///
    /// The pointer starts at the viewport origin and counts as absent
    /// until the first move.
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(TrackerState {
                update: PointerUpdate {
                    sample: Point2D::ORIGIN,
                    present: false,
                    scroll_progress: 0.0,
                    viewport,
                },
                generation: 0,
                events_applied: 0,
                subscribers: BTreeSet::new(),
                next_subscriber: 0,
            })),
        }
    }

    /// Register a consumer. The returned guard deregisters on drop.
    ///
    /// A fresh subscription reports the current state on its first
    /// [`PointerSubscription::take_update`].
    pub fn subscribe(&self) -> PointerSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_subscriber;
        state.next_subscriber += 1;
        state.subscribers.insert(id);
        tracing::debug!(
            subscriber = id,
            active = state.subscribers.len(),
            "Pointer subscription acquired"
        );

        PointerSubscription {
            id,
            state: Rc::downgrade(&self.state),
            seen_generation: Cell::new(None),
        }
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    /// Apply a single input event.
    pub fn dispatch(&self, event: &InputEvent) {
        let mut state = self.state.borrow_mut();
        match event.kind {
            EventKind::PointerMove { x, y } => {
                state.update.sample = Point2D::new(x, y);
                state.update.present = true;
            }
            EventKind::PointerLeave => {
                state.update.present = false;
            }
            EventKind::Scroll { progress } => {
                state.update.scroll_progress = clamp_progress(progress);
            }
            EventKind::Resize { width, height } => {
                state.update.viewport = ViewportSize::new(width, height);
            }
        }
        state.generation += 1;
        state.events_applied += 1;
        tracing::trace!(t = event.timestamp_ns, kind = ?event.kind, "Input event applied");
    }

    /// Drain every event from `source` that is due at `now_ns`, in order.
    ///
    /// Returns the number of events applied.
    pub fn pump(&self, source: &mut dyn PointerSource, now_ns: TimestampNs) -> usize {
        let mut applied = 0;
        while let Some(event) = source.poll(now_ns) {
            self.dispatch(&event);
            applied += 1;
        }
        applied
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> PointerUpdate {
        self.state.borrow().update
    }

    /// Last pointer position.
    pub fn sample(&self) -> PointerSample {
        self.state.borrow().update.sample
    }

    /// Scroll progress in `[0, 1]`.
    pub fn scroll_progress(&self) -> f64 {
        self.state.borrow().update.scroll_progress
    }

    /// Current viewport size.
    pub fn viewport(&self) -> ViewportSize {
        self.state.borrow().update.viewport
    }

    /// Total events applied since creation.
    pub fn events_applied(&self) -> u64 {
        self.state.borrow().events_applied
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}

/// A consumer's handle on the tracker.
///
/// Holds only a weak reference, so a subscription outliving its tracker
/// simply stops reporting updates.
#[derive(Debug)]
pub struct PointerSubscription {
    id: u64,
    state: Weak<RefCell<TrackerState>>,
    seen_generation: Cell<Option<u64>>,
}

impl PointerSubscription {
    /// Identifier unique within the tracker.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The current state, if the tracker is still alive.
    pub fn current(&self) -> Option<PointerUpdate> {
        self.state.upgrade().map(|state| state.borrow().update)
    }

    /// Last pointer position (origin once the tracker is gone).
    pub fn sample(&self) -> PointerSample {
        self.current()
            .map(|update| update.sample)
            .unwrap_or(Point2D::ORIGIN)
    }

    /// Scroll progress in `[0, 1]` (0 once the tracker is gone).
    pub fn scroll(&self) -> f64 {
        self.current()
            .map(|update| update.scroll_progress)
            .unwrap_or(0.0)
    }

    /// Returns the latest state if anything changed since the last call.
    ///
    /// This is the re-render trigger: consumers recompute their motion
    /// targets only when it yields `Some`.
    pub fn take_update(&self) -> Option<PointerUpdate> {
        let state = self.state.upgrade()?;
        let state = state.borrow();
        if self.seen_generation.get() == Some(state.generation) {
            return None;
        }
        self.seen_generation.set(Some(state.generation));
        Some(state.update)
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.borrow_mut();
            state.subscribers.remove(&self.id);
            tracing::debug!(
                subscriber = self.id,
                active = state.subscribers.len(),
                "Pointer subscription released"
            );
        }
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_move_overwrites_sample() {
        let tracker = PointerTracker::default();
        tracker.dispatch(&InputEvent::pointer(0, 10.0, 20.0));
        tracker.dispatch(&InputEvent::pointer(1, 30.0, 40.0));
        assert_eq!(tracker.sample(), Point2D::new(30.0, 40.0));
        assert!(tracker.current().present);
        assert_eq!(tracker.events_applied(), 2);
    }

    #[test]
    fn test_leave_keeps_last_position() {
        let tracker = PointerTracker::default();
        tracker.dispatch(&InputEvent::pointer(0, 10.0, 20.0));
        tracker.dispatch(&InputEvent::leave(1));
        let update = tracker.current();
        assert!(!update.present);
        assert_eq!(update.sample, Point2D::new(10.0, 20.0));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let tracker = PointerTracker::default();
        let sub = tracker.subscribe();
        tracker.dispatch(&InputEvent::scroll(0, 1.7));
        assert_eq!(tracker.scroll_progress(), 1.0);
        assert_eq!(sub.scroll(), 1.0);
        tracker.dispatch(&InputEvent::scroll(1, -0.2));
        assert_eq!(tracker.scroll_progress(), 0.0);
        tracker.dispatch(&InputEvent::scroll(2, f64::NAN));
        assert_eq!(tracker.scroll_progress(), 0.0);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let tracker = PointerTracker::default();
        tracker.dispatch(&InputEvent::resize(0, 1920.0, 1080.0));
        assert_eq!(tracker.viewport(), ViewportSize::new(1920.0, 1080.0));
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let tracker = PointerTracker::default();
        let a = tracker.subscribe();
        let b = tracker.subscribe();
        assert_ne!(a.id(), b.id());
        assert_eq!(tracker.active_subscriptions(), 2);

        drop(a);
        assert_eq!(tracker.active_subscriptions(), 1);
        drop(b);
        assert_eq!(tracker.active_subscriptions(), 0);
    }

    #[test]
    fn test_take_update_fires_once_per_change() {
        let tracker = PointerTracker::default();
        let sub = tracker.subscribe();

        // Initial state is reported once.
        assert!(sub.take_update().is_some());
        assert!(sub.take_update().is_none());

        tracker.dispatch(&InputEvent::pointer(0, 5.0, 6.0));
        let update = sub.take_update().unwrap();
        assert_eq!(update.sample, Point2D::new(5.0, 6.0));
        assert!(sub.take_update().is_none());
    }

    #[test]
    fn test_subscriptions_see_changes_independently() {
        let tracker = PointerTracker::default();
        let a = tracker.subscribe();
        let b = tracker.subscribe();
        a.take_update();
        b.take_update();

        tracker.dispatch(&InputEvent::pointer(0, 1.0, 1.0));
        assert!(a.take_update().is_some());
        assert!(b.take_update().is_some());
        assert!(a.take_update().is_none());
    }

    #[test]
    fn test_subscription_outliving_tracker() {
        let tracker = PointerTracker::default();
        let sub = tracker.subscribe();
        drop(tracker);
        assert!(sub.take_update().is_none());
        assert_eq!(sub.sample(), Point2D::ORIGIN);
        assert_eq!(sub.scroll(), 0.0);
        // Dropping after the tracker is gone must not panic.
        drop(sub);
    }

    #[test]
    fn test_pump_drains_due_events_in_order() {
        let tracker = PointerTracker::default();
        let mut source = ScriptedSource::new(vec![
            InputEvent::pointer(0, 1.0, 1.0),
            InputEvent::pointer(10, 2.0, 2.0),
            InputEvent::pointer(20, 3.0, 3.0),
        ]);

        assert_eq!(tracker.pump(&mut source, 10), 2);
        assert_eq!(tracker.sample(), Point2D::new(2.0, 2.0));
        assert_eq!(tracker.pump(&mut source, 15), 0);
        assert_eq!(tracker.pump(&mut source, 100), 1);
        assert_eq!(tracker.sample(), Point2D::new(3.0, 3.0));
    }
}
