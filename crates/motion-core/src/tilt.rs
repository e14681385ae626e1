//! 3D tilt for the holographic feature cards.
//!
//! The pointer offset from the card center is mapped linearly onto a
//! rotation: `±300 px` vertical becomes `∓15°` around X, `±300 px`
//! horizontal becomes `±15°` around Y. Offsets beyond the input range
//! saturate. While the pointer is over the card its scale springs to
//! the hover scale.

use pizzafun_page_model::geometry::ElementBounds;
use pizzafun_pointer_tracker::PointerUpdate;

use crate::map::map_range;
use crate::spring::{Spring, SpringConfig};
use crate::state::MotionState;
use crate::MotionMapper;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSettings {
    /// Largest rotation in degrees on either axis.
    pub max_degrees: f64,
    /// Pointer offset (px) at which the rotation saturates.
    pub input_range_px: f64,
    /// Scale while hovered.
    pub hover_scale: f64,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            max_degrees: 15.0,
            input_range_px: 300.0,
            hover_scale: 1.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HolographicCard {
    bounds: ElementBounds,
    settings: TiltSettings,
    rotate_x: Spring,
    rotate_y: Spring,
    scale: Spring,
    hovered: bool,
}

impl HolographicCard {
    pub fn new(bounds: ElementBounds) -> Self {
        Self::with_settings(bounds, TiltSettings::default())
    }

    pub fn with_settings(bounds: ElementBounds, settings: TiltSettings) -> Self {
        Self {
            bounds,
            settings,
            rotate_x: Spring::new(SpringConfig::TILT, 0.0),
            rotate_y: Spring::new(SpringConfig::TILT, 0.0),
            scale: Spring::new(SpringConfig::TILT, 1.0),
            hovered: false,
        }
    }

    pub fn bounds(&self) -> ElementBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: ElementBounds) {
        self.bounds = bounds;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Rotation targets `(rotate_x, rotate_y)` for a pointer offset.
    pub fn rotation_for_offset(&self, dx: f64, dy: f64) -> (f64, f64) {
        let range = (-self.settings.input_range_px, self.settings.input_range_px);
        let max = self.settings.max_degrees;
        (
            map_range(dy, range, (max, -max)),
            map_range(dx, range, (-max, max)),
        )
    }
}

impl MotionMapper for HolographicCard {
    fn observe(&mut self, update: &PointerUpdate) {
        self.hovered = update.present && self.bounds.contains(&update.sample);
        if self.hovered {
            let (dx, dy) = update.sample.offset_from(&self.bounds.center());
            let (rx, ry) = self.rotation_for_offset(dx, dy);
            self.rotate_x.set_target(rx);
            self.rotate_y.set_target(ry);
            self.scale.set_target(self.settings.hover_scale);
        } else {
            self.rotate_x.set_target(0.0);
            self.rotate_y.set_target(0.0);
            self.scale.set_target(1.0);
        }
    }

    fn step(&mut self, dt_secs: f64) {
        self.rotate_x.step(dt_secs);
        self.rotate_y.step(dt_secs);
        self.scale.step(dt_secs);
    }

    fn state(&self) -> MotionState {
        MotionState {
            rotate_x: self.rotate_x.value(),
            rotate_y: self.rotate_y.value(),
            scale: self.scale.value(),
            ..MotionState::NEUTRAL
        }
    }

    fn is_settled(&self) -> bool {
        self.rotate_x.is_at_rest() && self.rotate_y.is_at_rest() && self.scale.is_at_rest()
    }

    fn css_transform(&self) -> String {
        let state = self.state();
        format!(
            "perspective(1000px) rotateX({:.3}deg) rotateY({:.3}deg) scale({:.4})",
            state.rotate_x, state.rotate_y, state.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_page_model::geometry::{Point2D, ViewportSize};

    fn hover(x: f64, y: f64) -> PointerUpdate {
        PointerUpdate {
            sample: Point2D::new(x, y),
            present: true,
            scroll_progress: 0.0,
            viewport: ViewportSize::default(),
        }
    }

    fn run(card: &mut HolographicCard, frames: usize) {
        for _ in 0..frames {
            card.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_rotation_mapping() {
        let card = HolographicCard::new(ElementBounds::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(card.rotation_for_offset(0.0, 0.0), (0.0, 0.0));
        assert_eq!(card.rotation_for_offset(300.0, 300.0), (-15.0, 15.0));
        assert_eq!(card.rotation_for_offset(-150.0, -150.0), (7.5, -7.5));
        assert_eq!(card.rotation_for_offset(5000.0, -5000.0), (15.0, 15.0));
    }

    #[test]
    fn test_hover_tilts_and_scales() {
        let mut card = HolographicCard::new(ElementBounds::new(0.0, 0.0, 600.0, 600.0));
        card.observe(&hover(450.0, 150.0));
        assert!(card.is_hovered());
        run(&mut card, 600);

        let state = card.state();
        assert!(card.is_settled());
        assert!((state.rotate_x - 7.5).abs() < 1e-9);
        assert!((state.rotate_y - 7.5).abs() < 1e-9);
        assert!((state.scale - 1.05).abs() < 1e-9);
        assert!(card.css_transform().starts_with("perspective(1000px)"));
    }

    #[test]
    fn test_leave_returns_to_neutral() {
        let mut card = HolographicCard::new(ElementBounds::new(0.0, 0.0, 600.0, 600.0));
        card.observe(&hover(0.0, 0.0));
        run(&mut card, 30);
        assert!(!card.state().is_neutral(0.1));

        card.observe(&PointerUpdate {
            present: false,
            ..hover(0.0, 0.0)
        });
        run(&mut card, 900);
        assert!(!card.is_hovered());
        assert!(card.state().is_neutral(0.0));
    }
}
