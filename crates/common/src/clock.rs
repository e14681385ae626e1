//! Clock and timing utilities for the animation loop.
//!
//! Everything that moves on the page reads time through the [`Clock`]
//! trait so that tests and headless simulations can drive animations
//! deterministically:
//! - [`SystemClock`] is anchored to a monotonic epoch taken at mount
//! - [`ManualClock`] only moves when told to
//! - [`RateController`] paces frame delivery for real-time runs

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic timestamp in nanoseconds since the page was mounted.
pub type TimestampNs = u64;

/// Nanoseconds per millisecond.
pub const NS_PER_MS: u64 = 1_000_000;

/// Nanoseconds per second.
pub const NS_PER_SEC: u64 = 1_000_000_000;

/// Source of monotonic time for animations.
pub trait Clock {
    /// Nanoseconds elapsed since the clock's epoch.
    fn now_ns(&self) -> TimestampNs;

    /// Seconds elapsed since the clock's epoch.
    fn now_secs(&self) -> f64 {
        ns_to_secs(self.now_ns())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ns(&self) -> TimestampNs {
        (**self).now_ns()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ns(&self) -> TimestampNs {
        (**self).now_ns()
    }
}

/// A wall-clock backed clock that provides monotonic timestamps relative
/// to a fixed epoch (the moment the page mounted).
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SystemClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at clock start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

impl Clock for SystemClock {
    fn now_ns(&self) -> TimestampNs {
        self.epoch.elapsed().as_nanos() as u64
    }
}

/// A clock that only advances when explicitly told to.
///
/// Interior mutability lets one clock be shared (by reference or `Rc`)
/// between the simulation loop and every animation reading from it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ns: Cell<TimestampNs>,
}

impl ManualClock {
    /// Create a clock sitting at `t = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock sitting at the given timestamp.
    pub fn at(now_ns: TimestampNs) -> Self {
        Self {
            now_ns: Cell::new(now_ns),
        }
    }

    /// Move the clock forward by `delta_ns`.
    pub fn advance_ns(&self, delta_ns: u64) {
        self.now_ns.set(self.now_ns.get().saturating_add(delta_ns));
    }

    /// Move the clock forward by whole milliseconds.
    pub fn advance_ms(&self, delta_ms: u64) {
        self.advance_ns(delta_ms.saturating_mul(NS_PER_MS));
    }

    /// Move the clock forward by fractional seconds.
    pub fn advance_secs(&self, delta_secs: f64) {
        self.advance_ns(secs_to_ns(delta_secs));
    }

    /// Jump to an absolute timestamp. Going backwards is ignored so the
    /// clock stays monotonic.
    pub fn set_ns(&self, now_ns: TimestampNs) {
        if now_ns > self.now_ns.get() {
            self.now_ns.set(now_ns);
        }
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> TimestampNs {
        self.now_ns.get()
    }
}

/// Convert an elapsed nanosecond value to seconds.
pub fn ns_to_secs(ns: u64) -> f64 {
    ns as f64 / NS_PER_SEC as f64
}

/// Convert seconds to nanoseconds. Negative and NaN inputs map to zero.
pub fn secs_to_ns(secs: f64) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        return 0;
    }
    (secs * NS_PER_SEC as f64).round() as u64
}

/// Convert milliseconds to nanoseconds.
pub fn ms_to_ns(ms: u64) -> u64 {
    ms.saturating_mul(NS_PER_MS)
}

/// Frame rate controller for the render loop.
#[derive(Debug)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: NS_PER_SEC / target_hz.max(1) as u64,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}
