//! Headline text revealed with a per-character stagger.
//!
//! Every character fades in, rises from 50 px below and flips up from
//! -90° around X. Character `i` starts `delay + i * stagger` seconds
//! after the first frame and takes `duration` seconds, eased with
//! [`Easing::REVEAL`].

use pizzafun_common::clock::{ns_to_secs, TimestampNs};
use pizzafun_motion_core::easing::Easing;
use serde::Serialize;

use crate::{elapsed_since, AnimationPhase, FrameAnimation, FrameContext};

pub const DEFAULT_STAGGER_SECS: f64 = 0.05;
pub const DEFAULT_CHAR_DURATION_SECS: f64 = 0.8;

const START_OFFSET_Y: f64 = 50.0;
const FLIP_DEGREES: f64 = 90.0;

/// Rendered state of one character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlyphState {
    /// The character to draw (spaces become non-breaking spaces).
    pub ch: char,
    pub opacity: f64,
    pub offset_y: f64,
    pub rotate_x: f64,
}

impl GlyphState {
    pub fn css_transform(&self) -> String {
        format!(
            "translateY({:.3}px) rotateX({:.3}deg)",
            self.offset_y, self.rotate_x
        )
    }
}

#[derive(Debug, Clone)]
pub struct StaggeredText {
    chars: Vec<char>,
    delay_secs: f64,
    stagger_secs: f64,
    duration_secs: f64,
    easing: Easing,
    start_ns: Option<TimestampNs>,
    elapsed_secs: f64,
    phase: AnimationPhase,
}

impl StaggeredText {
    pub fn new(text: &str, delay_secs: f64) -> Self {
        Self::with_timing(
            text,
            delay_secs,
            DEFAULT_STAGGER_SECS,
            DEFAULT_CHAR_DURATION_SECS,
        )
    }

    pub fn with_timing(text: &str, delay_secs: f64, stagger_secs: f64, duration_secs: f64) -> Self {
        let non_negative = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            chars: text.chars().collect(),
            delay_secs: non_negative(delay_secs),
            stagger_secs: non_negative(stagger_secs),
            duration_secs: non_negative(duration_secs),
            easing: Easing::REVEAL,
            start_ns: None,
            elapsed_secs: 0.0,
            phase: AnimationPhase::Idle,
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Seconds from the first frame until the last character settles.
    pub fn total_duration_secs(&self) -> f64 {
        match self.chars.len() {
            0 => 0.0,
            n => self.delay_secs + (n - 1) as f64 * self.stagger_secs + self.duration_secs,
        }
    }

    /// Eased progress of character `index` at `elapsed_secs`.
    pub fn char_progress(&self, index: usize, elapsed_secs: f64) -> f64 {
        let start = self.delay_secs + index as f64 * self.stagger_secs;
        let local = elapsed_secs - start;
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration_secs == 0.0 || local >= self.duration_secs {
            return 1.0;
        }
        self.easing.apply(local / self.duration_secs)
    }

    pub fn glyph(&self, index: usize) -> Option<GlyphState> {
        let ch = *self.chars.get(index)?;
        let eased = if self.phase.is_complete() {
            1.0
        } else {
            self.char_progress(index, self.elapsed_secs)
        };
        Some(GlyphState {
            ch: if ch == ' ' { '\u{a0}' } else { ch },
            opacity: eased.clamp(0.0, 1.0),
            offset_y: START_OFFSET_Y * (1.0 - eased),
            rotate_x: FLIP_DEGREES * (eased - 1.0),
        })
    }

    pub fn glyphs(&self) -> Vec<GlyphState> {
        (0..self.chars.len()).filter_map(|i| self.glyph(i)).collect()
    }
}

impl FrameAnimation for StaggeredText {
    fn advance(&mut self, frame: &mut FrameContext<'_>) -> AnimationPhase {
        if self.phase.is_complete() {
            return self.phase;
        }
        let start = *self.start_ns.get_or_insert(frame.now_ns);
        let elapsed = ns_to_secs(elapsed_since(start, frame.now_ns));
        self.elapsed_secs = self.elapsed_secs.max(elapsed);
        self.phase = if self.elapsed_secs >= self.total_duration_secs() {
            self.elapsed_secs = self.total_duration_secs();
            AnimationPhase::Complete
        } else {
            AnimationPhase::Running
        };
        self.phase
    }

    fn phase(&self) -> AnimationPhase {
        self.phase
    }

    fn progress(&self) -> f64 {
        let total = self.total_duration_secs();
        if total == 0.0 {
            return if self.phase.is_complete() { 1.0 } else { 0.0 };
        }
        (self.elapsed_secs / total).clamp(0.0, 1.0)
    }
}
