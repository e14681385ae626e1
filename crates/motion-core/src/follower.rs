//! The small dot trailing the pointer.

use pizzafun_page_model::geometry::Point2D;
use pizzafun_pointer_tracker::PointerUpdate;

use crate::spring::{Spring, SpringConfig};
use crate::state::MotionState;
use crate::MotionMapper;

#[derive(Debug, Clone)]
pub struct PointerFollower {
    size_px: f64,
    x: Spring,
    y: Spring,
}

impl PointerFollower {
    /// A follower dot of diameter `size_px`, parked at the origin.
    pub fn new(size_px: f64) -> Self {
        let size_px = if size_px.is_finite() && size_px > 0.0 {
            size_px
        } else {
            24.0
        };
        let half = size_px / 2.0;
        Self {
            size_px,
            x: Spring::new(SpringConfig::FOLLOWER, -half),
            y: Spring::new(SpringConfig::FOLLOWER, -half),
        }
    }

    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    /// Top-left corner the dot is heading for.
    pub fn target(&self) -> Point2D {
        Point2D::new(self.x.target(), self.y.target())
    }
}

impl Default for PointerFollower {
    fn default() -> Self {
        Self::new(24.0)
    }
}

impl MotionMapper for PointerFollower {
    fn observe(&mut self, update: &PointerUpdate) {
        let half = self.size_px / 2.0;
        self.x.set_target(update.sample.x - half);
        self.y.set_target(update.sample.y - half);
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
