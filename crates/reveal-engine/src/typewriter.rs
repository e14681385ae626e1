//! Character-by-character text reveal.

use pizzafun_common::clock::{ms_to_ns, secs_to_ns, TimestampNs};

use crate::{elapsed_since, AnimationPhase, FrameAnimation, FrameContext};

/// Delay between two revealed characters.
pub const DEFAULT_CHAR_DELAY_MS: u64 = 50;

/// Appends one character at a time until the whole text is shown.
///
/// Character `i` (0-based) becomes visible once
/// `elapsed >= start_delay + i * per_char`, so the first character shows
/// as soon as the start delay has passed. The count is derived
/// from elapsed time on every frame, so a late frame reveals several
/// characters at once instead of dropping any.
#[derive(Debug, Clone)]
pub struct CharacterReveal {
    text: String,
    /// Byte offset of the end of each character.
    boundaries: Vec<usize>,
    start_delay_ns: u64,
    per_char_ns: u64,
    start_ns: Option<TimestampNs>,
    revealed: usize,
    phase: AnimationPhase,
}

impl CharacterReveal {
    pub fn new(text: impl Into<String>, start_delay_secs: f64, per_char_ms: u64) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(offset, ch)| offset + ch.len_utf8())
            .collect();
        Self {
            text,
            boundaries,
            start_delay_ns: secs_to_ns(start_delay_secs),
            per_char_ns: ms_to_ns(per_char_ms),
            start_ns: None,
            revealed: 0,
            phase: AnimationPhase::Idle,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the full text.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// The visible prefix.
    pub fn displayed(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.boundaries[n - 1]],
        }
    }

    /// Characters that should be visible `elapsed_ns` after the start.
    pub fn count_at(&self, elapsed_ns: u64) -> usize {
        let Some(since_delay) = elapsed_ns.checked_sub(self.start_delay_ns) else {
            return 0;
        };
        if self.per_char_ns == 0 {
            return self.len();
        }
        let count = since_delay / self.per_char_ns + 1;
        usize::try_from(count).map_or(self.len(), |c| c.min(self.len()))
    }

    /// Time from start until the last character appears.
    pub fn total_duration_ns(&self) -> u64 {
        let gaps = self.len().saturating_sub(1) as u64;
        self.start_delay_ns + self.per_char_ns * gaps
    }
}

impl FrameAnimation for CharacterReveal {
    fn advance(&mut self, frame: &mut FrameContext<'_>) -> AnimationPhase {
        if self.phase.is_complete() {
            return self.phase;
        }
        let start = *self.start_ns.get_or_insert(frame.now_ns);
        let count = self.count_at(elapsed_since(start, frame.now_ns));
        self.revealed = self.revealed.max(count);
        self.phase = if self.revealed >= self.len() {
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
        if self.is_empty() {
            return if self.phase.is_complete() { 1.0 } else { 0.0 };
        }
        self.revealed as f64 / self.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_common::clock::NS_PER_MS;
    use pizzafun_common::random::SequenceRandom;

    fn advance_to(reveal: &mut CharacterReveal, now_ns: u64) -> AnimationPhase {
        let mut rng = SequenceRandom::constant(0.5);
        reveal.advance(&mut FrameContext::new(now_ns, &mut rng))
    }

    #[test]
    fn test_reveals_one_char_per_delay() {
        let mut reveal = CharacterReveal::new("PIZZA", 0.0, 50);
        assert_eq!(reveal.phase(), AnimationPhase::Idle);

        assert_eq!(advance_to(&mut reveal, 0), AnimationPhase::Running);
        assert_eq!(reveal.displayed(), "P");
        advance_to(&mut reveal, 49 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "P");
        advance_to(&mut reveal, 50 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "PI");
        advance_to(&mut reveal, 120 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "PIZ");
        assert_eq!(advance_to(&mut reveal, 199 * NS_PER_MS), AnimationPhase::Running);
        assert_eq!(advance_to(&mut reveal, 200 * NS_PER_MS), AnimationPhase::Complete);
        assert_eq!(reveal.displayed(), "PIZZA");
        assert_eq!(reveal.progress(), 1.0);
    }

    #[test]
    fn test_start_time_is_first_frame() {
        let mut reveal = CharacterReveal::new("ab", 0.0, 50);
        advance_to(&mut reveal, 1_000 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "a");
        advance_to(&mut reveal, 1_049 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "a");
        advance_to(&mut reveal, 1_050 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "ab");
    }

    #[test]
    fn test_start_delay() {
        let mut reveal = CharacterReveal::new("abc", 1.0, 50);
        advance_to(&mut reveal, 0);
        advance_to(&mut reveal, 999 * NS_PER_MS);
        assert_eq!(reveal.revealed_count(), 0);
        advance_to(&mut reveal, 1_000 * NS_PER_MS);
        assert_eq!(reveal.revealed_count(), 1);
        advance_to(&mut reveal, 1_050 * NS_PER_MS);
        assert_eq!(reveal.revealed_count(), 2);
        assert_eq!(reveal.total_duration_ns(), 1_100 * NS_PER_MS);
    }

    #[test]
    fn test_slow_frame_catches_up() {
        let mut reveal = CharacterReveal::new("hello world", 0.0, 50);
        advance_to(&mut reveal, 0);
        assert_eq!(advance_to(&mut reveal, 10_000 * NS_PER_MS), AnimationPhase::Complete);
        assert_eq!(reveal.displayed(), "hello world");
    }

    #[test]
    fn test_multibyte_chars_never_split() {
        let mut reveal = CharacterReveal::new("pi\u{1F355}za", 0.0, 10);
        advance_to(&mut reveal, 0);
        advance_to(&mut reveal, 20 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "pi\u{1F355}");
        assert_eq!(reveal.len(), 5);
    }

    #[test]
    fn test_empty_text_completes_on_first_frame() {
        let mut reveal = CharacterReveal::new("", 0.0, 50);
        assert_eq!(reveal.progress(), 0.0);
        assert_eq!(reveal.total_duration_ns(), 0);
        assert_eq!(advance_to(&mut reveal, 0), AnimationPhase::Complete);
        assert_eq!(reveal.progress(), 1.0);
    }

    #[test]
    fn test_time_going_backwards_never_hides_chars() {
        let mut reveal = CharacterReveal::new("abcd", 0.0, 50);
        advance_to(&mut reveal, 100 * NS_PER_MS);
        advance_to(&mut reveal, 200 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "abc");
        advance_to(&mut reveal, 150 * NS_PER_MS);
        assert_eq!(reveal.displayed(), "abc");
    }
}
