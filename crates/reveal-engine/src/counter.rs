//! Count-up number with a cosmetic glitch flicker.

use pizzafun_common::clock::{ms_to_ns, secs_to_ns, TimestampNs};

use crate::{elapsed_since, AnimationPhase, FrameAnimation, FrameContext};

pub const DEFAULT_DURATION_SECS: f64 = 2.0;
pub const DEFAULT_GLITCH_PROBABILITY: f64 = 0.1;
pub const DEFAULT_GLITCH_MS: u64 = 100;

/// An integer counting from 0 up to a target over a fixed duration.
///
/// `displayed = floor(min(elapsed / duration, 1) * target)`, with
/// elapsed measured from the first frame. On every frame while running a
/// glitch is triggered with the configured probability; it stays on for
/// the glitch duration and never affects the value. The glitch flag is a
/// function of time, so clearing it needs no extra frame.
#[derive(Debug, Clone)]
pub struct GlitchCounter {
    target: u64,
    suffix: String,
    duration_ns: u64,
    glitch_probability: f64,
    glitch_ns: u64,
    start_ns: Option<TimestampNs>,
    value: u64,
    glitch_until: Option<TimestampNs>,
    glitches: u64,
    frames: u64,
    phase: AnimationPhase,
}

impl GlitchCounter {
    pub fn new(target: u64, suffix: impl Into<String>) -> Self {
        Self {
            target,
            suffix: suffix.into(),
            duration_ns: secs_to_ns(DEFAULT_DURATION_SECS),
            glitch_probability: DEFAULT_GLITCH_PROBABILITY,
            glitch_ns: ms_to_ns(DEFAULT_GLITCH_MS),
            start_ns: None,
            value: 0,
            glitch_until: None,
            glitches: 0,
            frames: 0,
            phase: AnimationPhase::Idle,
        }
    }

    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_ns = secs_to_ns(duration_secs);
        self
    }

    /// Per-frame glitch probability, clamped to `[0, 1]`.
    pub fn with_glitch(mut self, probability: f64, duration_ms: u64) -> Self {
        self.glitch_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.glitch_ns = ms_to_ns(duration_ms);
        self
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Value that should be displayed `elapsed_ns` after the first frame.
    pub fn value_at(&self, elapsed_ns: u64) -> u64 {
        if self.duration_ns == 0 || elapsed_ns >= self.duration_ns {
            return self.target;
        }
        let fraction = elapsed_ns as f64 / self.duration_ns as f64;
        ((fraction * self.target as f64).floor() as u64).min(self.target)
    }

    /// Whether the glitch effect is showing at `now_ns`.
    pub fn is_glitching(&self, now_ns: TimestampNs) -> bool {
        self.glitch_until.is_some_and(|until| now_ns < until)
    }

    /// Glitches triggered so far.
    pub fn glitch_count(&self) -> u64 {
        self.glitches
    }

    /// Frames this counter has been advanced.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Formatted value with thousands separators and suffix.
    pub fn display_text(&self) -> String {
        format!("{}{}", format_thousands(self.value), self.suffix)
    }
}

impl FrameAnimation for GlitchCounter {
    fn advance(&mut self, frame: &mut FrameContext<'_>) -> AnimationPhase {
        if self.phase.is_complete() {
            return self.phase;
        }
        self.frames += 1;
        let start = *self.start_ns.get_or_insert(frame.now_ns);
        let elapsed = elapsed_since(start, frame.now_ns);
        self.value = self.value.max(self.value_at(elapsed));

        if frame.rng.chance(self.glitch_probability) {
            self.glitch_until = Some(frame.now_ns + self.glitch_ns);
            self.glitches += 1;
        }

        self.phase = if self.value >= self.target && elapsed >= self.duration_ns {
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
        if self.phase.is_complete() {
            return 1.0;
        }
        if self.target == 0 {
            return 0.0;
        }
        self.value as f64 / self.target as f64
    }
}

/// Format an integer with `,` every three digits.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_common::clock::NS_PER_MS;
    use pizzafun_common::random::SequenceRandom;

    fn frame_at(counter: &mut GlitchCounter, now_ns: u64, draw: f64) -> AnimationPhase {
        let mut rng = SequenceRandom::constant(draw);
        counter.advance(&mut FrameContext::new(now_ns, &mut rng))
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(35_000), "35,000");
        assert_eq!(format_thousands(210_000_000), "210,000,000");
    }

    #[test]
    fn test_counts_linearly_from_first_frame() {
        let mut counter = GlitchCounter::new(35_000, "TPS");
        assert_eq!(counter.phase(), AnimationPhase::Idle);
        frame_at(&mut counter, 500 * NS_PER_MS, 0.9);
        assert_eq!(counter.value(), 0);
        frame_at(&mut counter, 1_500 * NS_PER_MS, 0.9);
        assert_eq!(counter.value(), 17_500);
        assert_eq!(counter.display_text(), "17,500TPS");
        assert_eq!(
            frame_at(&mut counter, 2_500 * NS_PER_MS, 0.9),
            AnimationPhase::Complete
        );
        assert_eq!(counter.value(), 35_000);
        assert_eq!(counter.display_text(), "35,000TPS");
    }

    #[test]
    fn test_complete_stops_updating() {
        let mut counter = GlitchCounter::new(2, "SEC");
        frame_at(&mut counter, 0, 0.9);
        frame_at(&mut counter, 3_000 * NS_PER_MS, 0.9);
        let frames = counter.frames();
        assert_eq!(frame_at(&mut counter, 4_000 * NS_PER_MS, 0.0), AnimationPhase::Complete);
        assert_eq!(counter.frames(), frames);
        assert_eq!(counter.glitch_count(), 0);
    }

    #[test]
    fn test_zero_target_completes_after_duration() {
        let mut counter = GlitchCounter::new(0, "$");
        assert_eq!(frame_at(&mut counter, 0, 0.9), AnimationPhase::Running);
        assert_eq!(
            frame_at(&mut counter, 2_000 * NS_PER_MS, 0.9),
            AnimationPhase::Complete
        );
        assert_eq!(counter.display_text(), "0$");
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let mut counter = GlitchCounter::new(42, "").with_duration(0.0);
        assert_eq!(frame_at(&mut counter, 7, 0.9), AnimationPhase::Complete);
        assert_eq!(counter.value(), 42);
    }

    #[test]
    fn test_glitch_window() {
        let mut counter = GlitchCounter::new(100, "").with_glitch(0.1, 100);
        frame_at(&mut counter, 0, 0.05);
        assert!(counter.is_glitching(0));
        assert!(counter.is_glitching(99 * NS_PER_MS));
        assert!(!counter.is_glitching(100 * NS_PER_MS));

        frame_at(&mut counter, 16 * NS_PER_MS, 0.5);
        assert_eq!(counter.glitch_count(), 1);
    }

    #[test]
    fn test_glitch_probability_extremes() {
        let mut never = GlitchCounter::new(1_000, "").with_glitch(0.0, 100);
        let mut always = GlitchCounter::new(1_000, "").with_glitch(1.0, 100);
        for i in 0..=130u64 {
            let now = i * 16 * NS_PER_MS;
            frame_at(&mut never, now, 0.0);
            frame_at(&mut always, now, 0.999);
        }
        assert_eq!(never.glitch_count(), 0);
        assert_eq!(always.glitch_count(), always.frames());
        assert_eq!(never.value(), always.value());
    }
}
