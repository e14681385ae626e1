//! Buttons that lean towards the pointer.

use pizzafun_page_model::geometry::ElementBounds;
use pizzafun_pointer_tracker::PointerUpdate;

use crate::spring::{Spring, SpringConfig};
use crate::state::MotionState;
use crate::MotionMapper;

/// Fraction of the pointer offset applied to the button.
pub const DEFAULT_MAGNETIC_STRENGTH: f64 = 0.15;

/// A button translated by a fraction of the pointer's offset from its
/// center while the pointer is over it.
#[derive(Debug, Clone)]
pub struct MagneticButton {
    bounds: ElementBounds,
    strength: f64,
    x: Spring,
    y: Spring,
}

impl MagneticButton {
    pub fn new(bounds: ElementBounds) -> Self {
        Self::with_strength(bounds, DEFAULT_MAGNETIC_STRENGTH)
    }

    pub fn with_strength(bounds: ElementBounds, strength: f64) -> Self {
        Self {
            bounds,
            strength: if strength.is_finite() { strength } else { DEFAULT_MAGNETIC_STRENGTH },
            x: Spring::new(SpringConfig::MAGNETIC, 0.0),
            y: Spring::new(SpringConfig::MAGNETIC, 0.0),
        }
    }

    pub fn bounds(&self) -> ElementBounds {
        self.bounds
    }

    /// Move the button (layout change). Targets are refreshed on the next
    /// pointer update.
    pub fn set_bounds(&mut self, bounds: ElementBounds) {
        self.bounds = bounds;
    }

    /// Current `(x, y)` targets.
    pub fn target(&self) -> (f64, f64) {
        (self.x.target(), self.y.target())
    }
}

impl MotionMapper for MagneticButton {
    fn observe(&mut self, update: &PointerUpdate) {
        let hovered = update.present && self.bounds.contains(&update.sample);
        let (dx, dy) = if hovered {
            let (dx, dy) = update.sample.offset_from(&self.bounds.center());
            (dx * self.strength, dy * self.strength)
        } else {
            (0.0, 0.0)
        };
        self.x.set_target(dx);
        self.y.set_target(dy);
    }

    fn step(&mut self, dt_secs: f64) {
        self.x.step(dt_secs);
        self.y.step(dt_secs);
    }

    fn state(&self) -> MotionState {
        MotionState::translate(self.x.value(), self.y.value())
    }

    fn is_settled(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_page_model::geometry::{Point2D, ViewportSize};

    fn update(x: f64, y: f64, present: bool) -> PointerUpdate {
        PointerUpdate {
            sample: Point2D::new(x, y),
            present,
            scroll_progress: 0.0,
            viewport: ViewportSize::default(),
        }
    }

    fn settle(button: &mut MagneticButton) {
        for _ in 0..600 {
            button.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_target_is_scaled_offset() {
        let mut button = MagneticButton::new(ElementBounds::new(100.0, 100.0, 200.0, 60.0));
        button.observe(&update(260.0, 110.0, true));
        let (tx, ty) = button.target();
        assert!((tx - 9.0).abs() < 1e-9);
        assert!((ty + 3.0).abs() < 1e-9);

        settle(&mut button);
        assert!(button.is_settled());
        assert_eq!(button.state(), MotionState::translate(tx, ty));
    }

    #[test]
    fn test_outside_or_leave_returns_to_rest() {
        let mut button = MagneticButton::new(ElementBounds::new(0.0, 0.0, 100.0, 100.0));
        button.observe(&update(90.0, 90.0, true));
        settle(&mut button);
        assert!(!button.state().is_neutral(1.0));

        button.observe(&update(90.0, 90.0, false));
        settle(&mut button);
        assert!(button.state().is_neutral(0.0));

        button.observe(&update(500.0, 500.0, true));
        assert_eq!(button.target(), (0.0, 0.0));
    }

    #[test]
    fn test_pointer_at_center_is_neutral() {
        let mut button = MagneticButton::new(ElementBounds::new(0.0, 0.0, 100.0, 40.0));
        button.observe(&update(50.0, 20.0, true));
        assert_eq!(button.target(), (0.0, 0.0));
        assert!(button.is_settled());
    }
}
