//! Scroll-linked parallax for the hero grid background.

use pizzafun_pointer_tracker::PointerUpdate;

use crate::map::map_range;
use crate::spring::{Spring, SpringConfig};
use crate::state::MotionState;
use crate::MotionMapper;

/// Background drift and zoom driven by scroll progress.
///
/// Progress `0..1` maps to a vertical background offset of `0%..100%`
/// and a scale of `1..max_scale`, both smoothed by the default spring.
#[derive(Debug, Clone)]
pub struct ScrollParallax {
    max_scale: f64,
    progress: Spring,
}

impl ScrollParallax {
    pub fn new(max_scale: f64) -> Self {
        Self {
            max_scale: if max_scale.is_finite() && max_scale > 0.0 {
                max_scale
            } else {
                1.2
            },
            progress: Spring::new(SpringConfig::DEFAULT, 0.0),
        }
    }

    /// Smoothed scroll progress.
    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    /// Background vertical position in percent.
    pub fn background_y_percent(&self) -> f64 {
        map_range(self.progress.value(), (0.0, 1.0), (0.0, 100.0))
    }

    pub fn scale(&self) -> f64 {
        map_range(self.progress.value(), (0.0, 1.0), (1.0, self.max_scale))
    }
}

impl Default for ScrollParallax {
    fn default() -> Self {
        Self::new(1.2)
    }
}

impl MotionMapper for ScrollParallax {
    fn observe(&mut self, update: &PointerUpdate) {
        self.progress.set_target(update.scroll_progress.clamp(0.0, 1.0));
    }

    fn step(&mut self, dt_secs: f64) {
        self.progress.step(dt_secs);
    }

    fn state(&self) -> MotionState {
        MotionState {
            scale: self.scale(),
            ..MotionState::NEUTRAL
        }
    }

    fn is_settled(&self) -> bool {
        self.progress.is_at_rest()
    }

    fn css_transform(&self) -> String {
        format!(
            "translateY({:.3}%) scale({:.4})",
            self.background_y_percent(),
            self.scale()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_page_model::geometry::{Point2D, ViewportSize};

    fn scrolled(progress: f64) -> PointerUpdate {
        PointerUpdate {
            sample: Point2D::ORIGIN,
            present: false,
            scroll_progress: progress,
            viewport: ViewportSize::default(),
        }
    }

    #[test]
    fn test_at_top_is_identity() {
        let parallax = ScrollParallax::default();
        assert_eq!(parallax.background_y_percent(), 0.0);
        assert_eq!(parallax.scale(), 1.0);
        assert!(parallax.state().is_neutral(0.0));
        assert_eq!(parallax.css_transform(), "translateY(0.000%) scale(1.0000)");
    }

    #[test]
    fn test_full_scroll_settles_at_max() {
        let mut parallax = ScrollParallax::default();
        parallax.observe(&scrolled(1.0));
        for _ in 0..900 {
            parallax.step(1.0 / 60.0);
        }
        assert!(parallax.is_settled());
        assert_eq!(parallax.background_y_percent(), 100.0);
        assert!((parallax.scale() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_overshoot_is_clamped_in_output() {
        let mut parallax = ScrollParallax::default();
        parallax.observe(&scrolled(1.0));
        for _ in 0..900 {
            parallax.step(1.0 / 60.0);
            assert!(parallax.scale() <= 1.2 + 1e-12);
            assert!(parallax.background_y_percent() <= 100.0);
        }
    }
}
