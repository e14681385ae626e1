//! PizzaFun Reveal Engine: timed reveal animations
//!
//! Drives display values towards a target over wall-clock time, one
//! frame at a time:
//! - **Typewriter:** characters appended in source order
//! - **Staggered text:** per-character fade, lift and flip
//! - **Glitch counter:** an integer counting up with cosmetic flicker
//!
//! Frames are explicit. An animation runs only when its callback was
//! requested from the [`FrameScheduler`] and fired; a completed
//! animation requests nothing further. The [`RevealDriver`] owns a set
//! of animations and performs that bookkeeping.

pub mod counter;
pub mod driver;
pub mod scheduler;
pub mod staggered;
pub mod typewriter;

pub use counter::{format_thousands, GlitchCounter};
pub use driver::{AnimationId, RevealAnimation, RevealDriver};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use staggered::{GlyphState, StaggeredText};
pub use typewriter::CharacterReveal;

use pizzafun_common::clock::TimestampNs;
use pizzafun_common::random::RandomSource;
use serde::Serialize;

/// Lifecycle of a timed animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    /// Mounted, no frame seen yet.
    Idle,
    /// Elapsed fraction below 1.
    Running,
    /// Target reached. No further frames are needed.
    Complete,
}

impl AnimationPhase {
    pub fn is_complete(&self) -> bool {
        matches!(self, AnimationPhase::Complete)
    }
}

/// What a frame callback gets to see.
pub struct FrameContext<'a> {
    /// Timestamp of the frame being rendered.
    pub now_ns: TimestampNs,
    /// Randomness for cosmetic effects.
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> FrameContext<'a> {
    pub fn new(now_ns: TimestampNs, rng: &'a mut dyn RandomSource) -> Self {
        Self { now_ns, rng }
    }
}

/// An animation advanced by frame callbacks.
pub trait FrameAnimation {
    /// Advance to the frame's timestamp and report the resulting phase.
    ///
    /// The first call fixes the animation's start time.
    fn advance(&mut self, frame: &mut FrameContext<'_>) -> AnimationPhase;

    /// Current phase.
    fn phase(&self) -> AnimationPhase;

    /// Progress in `[0, 1]`.
    fn progress(&self) -> f64;
}

/// Elapsed nanoseconds since `start`, zero before it.
pub(crate) fn elapsed_since(start: TimestampNs, now: TimestampNs) -> TimestampNs {
    now.saturating_sub(start)
}
