//! PizzaFun Motion Core: the Motion Mapper
//!
//! Converts raw pointer offsets and scroll progress into bounded,
//! spring-smoothed transform values:
//! - **Springs:** mass/stiffness/damping integration with rest detection
//! - **Magnetic buttons:** buttons that lean towards the pointer
//! - **Holographic cards:** 3D tilt and hover scale from pointer offset
//! - **Pointer follower:** a dot trailing the pointer
//! - **Scroll parallax:** background drift and zoom from scroll progress
//! - **Particles and keyframes:** time-driven ambient motion
//!
//! This crate is pure computation: inputs are pointer snapshots and
//! frame deltas, outputs are [`MotionState`] values.

pub mod easing;
pub mod follower;
pub mod keyframes;
pub mod magnetic;
pub mod map;
pub mod particles;
pub mod scroll;
pub mod spring;
pub mod state;
pub mod tilt;

pub use easing::Easing;
pub use follower::PointerFollower;
pub use keyframes::KeyframeTrack;
pub use magnetic::MagneticButton;
pub use map::map_range;
pub use particles::{Particle, ParticleField};
pub use scroll::ScrollParallax;
pub use spring::{Spring, SpringConfig};
pub use state::MotionState;
pub use tilt::HolographicCard;

use pizzafun_pointer_tracker::PointerUpdate;

/// A pointer- or scroll-driven component with smoothed output.
///
/// The runtime calls [`observe`](MotionMapper::observe) when the
/// pointer state changes and [`step`](MotionMapper::step) once per
/// frame while the component is not settled.
pub trait MotionMapper {
    /// Recompute targets from a new pointer snapshot.
    fn observe(&mut self, update: &PointerUpdate);

    /// Advance the springs by `dt_secs`.
    fn step(&mut self, dt_secs: f64);

    /// Current smoothed output.
    fn state(&self) -> MotionState;

    /// Whether every spring is at rest on its target.
    fn is_settled(&self) -> bool;

    /// CSS transform for the current output.
    fn css_transform(&self) -> String {
        self.state().css_transform()
    }
}
