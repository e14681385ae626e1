//! Looping keyframe tracks for ambient decoration.
//!
//! A track is a pure function of time since mount. Keyframes are evenly
//! spaced over the track's duration and the easing is applied to each
//! segment. A start delay applies once, before the first pass; repeats
//! follow back to back.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    pub values: Vec<f64>,
    pub duration_secs: f64,
    #[serde(default)]
    pub delay_secs: f64,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub easing: Easing,
}

impl KeyframeTrack {
    /// A track playing once with ease-in-out segments.
    pub fn new(values: Vec<f64>, duration_secs: f64) -> Self {
        Self {
            values,
            duration_secs,
            delay_secs: 0.0,
            repeat: false,
            easing: Easing::EaseInOut,
        }
    }

    pub fn delayed(mut self, delay_secs: f64) -> Self {
        self.delay_secs = delay_secs.max(0.0);
        self
    }

    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Value at `t_secs` after mount.
    pub fn sample(&self, t_secs: f64) -> f64 {
        let (first, last) = match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };
        if self.values.len() == 1 || !(self.duration_secs > 0.0) {
            return first;
        }

        let local = t_secs - self.delay_secs;
        if !(local > 0.0) {
            return first;
        }
        if !self.repeat && local >= self.duration_secs {
            return last;
        }

        let progress = (local % self.duration_secs) / self.duration_secs;
        let segments = (self.values.len() - 1) as f64;
        let position = progress * segments;
        let index = (position.floor() as usize).min(self.values.len() - 2);
        let local_t = self.easing.apply(position - index as f64);
        let (a, b) = (self.values[index], self.values[index + 1]);
        a + (b - a) * local_t
    }

    /// Whether a non-repeating track has played to the end.
    pub fn is_finished(&self, t_secs: f64) -> bool {
        !self.repeat && t_secs - self.delay_secs >= self.duration_secs
    }

    /// Expanding ring around a hero stat card (`index` 0..3).
    pub fn pulse_ring_scale(index: usize) -> Self {
        Self::new(vec![1.0, 2.0, 1.0], 2.0)
            .delayed(index as f64 * 0.6)
            .repeating()
    }

    pub fn pulse_ring_opacity(index: usize) -> Self {
        Self::new(vec![0.7, 0.0, 0.7], 2.0)
            .delayed(index as f64 * 0.6)
            .repeating()
    }

    /// Glow radius (px) of the header's pulsing call-to-action shadow.
    pub fn glow_radius() -> Self {
        Self::new(vec![20.0, 40.0, 20.0], 2.0).repeating()
    }

    pub fn glow_alpha() -> Self {
        Self::new(vec![0.3, 0.6, 0.3], 2.0).repeating()
    }

    /// Inner glow layer of every holographic card.
    pub fn holographic_glow_scale() -> Self {
        Self::new(vec![1.0, 1.1, 1.0], 3.0).repeating()
    }

    pub fn holographic_glow_opacity() -> Self {
        Self::new(vec![0.5, 0.8, 0.5], 3.0).repeating()
    }

    /// Full turn (deg) of a hero stat icon around its vertical axis.
    pub fn stat_icon_spin() -> Self {
        Self::new(vec![0.0, 360.0], 4.0)
            .repeating()
            .with_easing(Easing::Linear)
    }

    pub fn stat_icon_scale() -> Self {
        Self::new(vec![1.0, 1.1, 1.0], 2.0).repeating()
    }

    /// Blend between the two wave outlines under the performance chart:
    /// 0 is the first outline, 1 the second.
    pub fn wave_morph() -> Self {
        Self::new(vec![0.0, 1.0, 0.0], 8.0).repeating()
    }

    /// Vertical bob (px) of a feature card icon.
    pub fn feature_float(index: usize) -> Self {
        Self::new(vec![0.0, -10.0, 0.0], 3.0)
            .delayed(index as f64 * 0.5)
            .repeating()
    }

    pub fn feature_tilt(index: usize) -> Self {
        Self::new(vec![0.0, 10.0, 0.0], 3.0)
            .delayed(index as f64 * 0.5)
            .repeating()
    }

    /// Spread (px) of the pulse around a roadmap milestone dot.
    pub fn roadmap_pulse_spread(index: usize) -> Self {
        Self::new(vec![0.0, 10.0, 0.0], 2.0)
            .delayed(index as f64 * 0.3)
            .repeating()
    }

    pub fn roadmap_pulse_alpha(index: usize) -> Self {
        Self::new(vec![0.7, 0.0, 0.0], 2.0)
            .delayed(index as f64 * 0.3)
            .repeating()
    }

    /// Wiggle of the lightning bolt after the headline.
    pub fn bolt_rotation() -> Self {
        Self::new(vec![0.0, 10.0, -10.0, 0.0], 2.0).repeating()
    }

    pub fn bolt_scale() -> Self {
        Self::new(vec![1.0, 1.2, 1.0], 2.0).repeating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_ring_keyframes() {
        let ring = KeyframeTrack::pulse_ring_scale(0);
        assert_eq!(ring.sample(0.0), 1.0);
        assert_eq!(ring.sample(1.0), 2.0);
        assert!((ring.sample(2.0) - 1.0).abs() < 1e-9);
        assert_eq!(ring.sample(3.0), 2.0);

        let opacity = KeyframeTrack::pulse_ring_opacity(0);
        assert_eq!(opacity.sample(1.0), 0.0);
    }

    #[test]
    fn test_delay_holds_first_value() {
        let ring = KeyframeTrack::pulse_ring_scale(2);
        assert_eq!(ring.delay_secs, 1.2);
        assert_eq!(ring.sample(1.0), 1.0);
        assert_eq!(ring.sample(2.2), 2.0);
    }

    #[test]
    fn test_non_repeating_holds_last_value() {
        let track = KeyframeTrack::new(vec![0.0, 5.0], 1.0).with_easing(Easing::Linear);
        assert_eq!(track.sample(0.5), 2.5);
        assert_eq!(track.sample(10.0), 5.0);
        assert!(track.is_finished(1.0));
        assert!(!KeyframeTrack::glow_alpha().is_finished(100.0));
    }

    #[test]
    fn test_four_keyframes_evenly_spaced() {
        let bolt = KeyframeTrack::bolt_rotation().with_easing(Easing::Linear);
        assert!((bolt.sample(2.0 / 3.0) - 10.0).abs() < 1e-9);
        assert!((bolt.sample(4.0 / 3.0) + 10.0).abs() < 1e-9);
        assert!(bolt.sample(1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wave_morph_swings_between_outlines() {
        let wave = KeyframeTrack::wave_morph();
        assert_eq!(wave.sample(0.0), 0.0);
        assert_eq!(wave.sample(4.0), 1.0);
        assert!(wave.sample(8.0).abs() < 1e-9);
        assert_eq!(wave.sample(12.0), 1.0);
        assert!(!wave.is_finished(1_000.0));
    }

    #[test]
    fn test_stat_icon_spin_is_linear() {
        let spin = KeyframeTrack::stat_icon_spin();
        assert!((spin.sample(1.0) - 90.0).abs() < 1e-9);
        assert!((spin.sample(5.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_tracks() {
        assert_eq!(KeyframeTrack::new(Vec::new(), 1.0).sample(0.5), 0.0);
        assert_eq!(KeyframeTrack::new(vec![3.0], 1.0).sample(0.5), 3.0);
        assert_eq!(KeyframeTrack::new(vec![3.0, 4.0], 0.0).sample(0.5), 3.0);
    }

    #[test]
    fn test_feature_float_stays_in_range() {
        let float = KeyframeTrack::feature_float(1);
        for i in 0..300 {
            let y = float.sample(i as f64 / 30.0);
            assert!((-10.0..=0.0).contains(&y));
        }
    }
}
