//! Smoothed transform values for one component.

use serde::{Deserialize, Serialize};

/// Per-component output of the Motion Mapper.
///
/// Created when a component mounts, recomputed on every pointer/scroll
/// change and frame, discarded on unmount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Horizontal translation (px).
    pub offset_x: f64,
    /// Vertical translation (px).
    pub offset_y: f64,
    /// Rotation around the X axis (degrees).
    pub rotate_x: f64,
    /// Rotation around the Y axis (degrees).
    pub rotate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl MotionState {
    /// Rest value: no offset, no rotation, identity scale.
    pub const NEUTRAL: MotionState = MotionState {
        offset_x: 0.0,
        offset_y: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// A pure translation.
    pub fn translate(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            ..Self::NEUTRAL
        }
    }

    /// Whether every component is within `epsilon` of neutral.
    pub fn is_neutral(&self, epsilon: f64) -> bool {
        self.offset_x.abs() <= epsilon
            && self.offset_y.abs() <= epsilon
            && self.rotate_x.abs() <= epsilon
            && self.rotate_y.abs() <= epsilon
            && (self.scale - 1.0).abs() <= epsilon
    }

    /// CSS transform string for this state.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.3}px, {:.3}px, 0px) rotateX({:.3}deg) rotateY({:.3}deg) scale({:.4})",
            self.offset_x, self.offset_y, self.rotate_x, self.rotate_y, self.scale
        )
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_css() {
        assert_eq!(
            MotionState::NEUTRAL.css_transform(),
            "translate3d(0.000px, 0.000px, 0px) rotateX(0.000deg) rotateY(0.000deg) scale(1.0000)"
        );
    }

    #[test]
    fn test_css_transform_string_is_stable() {
        let state = MotionState {
            offset_x: -12.3456,
            offset_y: 9.876,
            rotate_x: 15.0,
            rotate_y: -7.5,
            scale: 1.05,
        };
        let css = state.css_transform();
        assert!(css.contains("translate3d(-12.346px, 9.876px, 0px)"));
        assert!(css.contains("rotateX(15.000deg)"));
        assert!(css.contains("rotateY(-7.500deg)"));
        assert!(css.contains("scale(1.0500)"));
    }

    #[test]
    fn test_is_neutral() {
        assert!(MotionState::NEUTRAL.is_neutral(0.0));
        assert!(!MotionState::translate(0.5, 0.0).is_neutral(0.1));
        assert!(MotionState::translate(0.05, 0.0).is_neutral(0.1));
    }
}
