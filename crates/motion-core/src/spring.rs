//! Damped spring used to smooth every pointer-driven value.
//!
//! The spring is integrated with semi-implicit Euler in fixed sub-steps.
//! Sub-steps are small relative to both the natural period and the
//! damping time constant of the configured spring, so a long frame gap
//! costs more iterations but never destabilizes the integration.

use serde::{Deserialize, Serialize};

/// Longest sub-step ever taken (seconds).
const MAX_SUBSTEP_SECS: f64 = 1.0 / 240.0;

/// Longest frame delta simulated in one call. Anything beyond this is a
/// stalled host (e.g. a backgrounded tab) and the spring just settles.
const MAX_FRAME_SECS: f64 = 1.0;

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Restoring force per unit of displacement.
    pub stiffness: f64,
    /// Opposing force per unit of velocity.
    pub damping: f64,
    /// Mass of the simulated body.
    pub mass: f64,
    /// Distance from target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
}

impl SpringConfig {
    /// General purpose spring (stiffness 100, damping 10).
    pub const DEFAULT: SpringConfig = SpringConfig::new(100.0, 10.0);

    /// Magnetic buttons (stiffness 300, damping 30).
    pub const MAGNETIC: SpringConfig = SpringConfig::new(300.0, 30.0);

    /// Pointer follower dot (stiffness 500, damping 28).
    pub const FOLLOWER: SpringConfig = SpringConfig::new(500.0, 28.0);

    /// Card tilt and hover scale.
    pub const TILT: SpringConfig = SpringConfig::DEFAULT;

    /// Spring with unit mass and default rest thresholds.
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    /// Damping ratio ζ. Below 1 the spring oscillates around its target.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency ω₀ (rad/s).
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Largest overshoot past a step target, as a fraction of the step.
    ///
    /// `exp(-ζπ/√(1-ζ²))` for under-damped springs, zero otherwise.
    pub fn overshoot_ratio(&self) -> f64 {
        let zeta = self.damping_ratio();
        if zeta >= 1.0 {
            0.0
        } else {
            (-zeta * std::f64::consts::PI / (1.0 - zeta * zeta).sqrt()).exp()
        }
    }

    /// Sub-step length used for integration.
    fn substep_secs(&self) -> f64 {
        let period_bound = 0.5 / self.natural_frequency().max(f64::EPSILON);
        let damping_bound = 0.5 * self.mass / self.damping.max(f64::EPSILON);
        MAX_SUBSTEP_SECS.min(period_bound).min(damping_bound)
    }

    /// Replace nonsensical parameters with the default spring's.
    fn sanitized(self) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.stiffness) && valid(self.damping) && valid(self.mass) {
            self
        } else {
            tracing::warn!(?self, "Invalid spring config, using default");
            Self::DEFAULT
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single animated value pulled towards a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config: config.sanitized(),
            value,
            velocity: 0.0,
            target: value,
            at_rest: true,
        }
    }

    /// Move the target. The spring wakes up if the target changed.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if target != self.target {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Teleport to `value` and stop.
    pub fn jump_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance the simulation by `dt_secs` and return the new value.
    pub fn step(&mut self, dt_secs: f64) -> f64 {
        if self.at_rest || !(dt_secs > 0.0) {
            return self.value;
        }

        let dt = dt_secs.min(MAX_FRAME_SECS);
        let max_h = self.config.substep_secs();
        let steps = (dt / max_h).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;

        for _ in 0..steps {
            let displacement = self.value - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;

            if (self.value - self.target).abs() < self.config.rest_delta
                && self.velocity.abs() < self.config.rest_speed
            {
                self.value = self.target;
                self.velocity = 0.0;
                self.at_rest = true;
                break;
            }
        }

        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Whether the spring sits exactly on its target with no velocity.
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }
}
