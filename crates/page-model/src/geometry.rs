//! Geometry types for pointer-relative effects.
//!
//! All values are CSS pixels in viewport space: `(0, 0)` is the top-left
//! corner of the visible area.

use serde::{Deserialize, Serialize};

/// A 2D point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Offset of `self` relative to `origin`.
    pub fn offset_from(&self, origin: &Point2D) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        Point2D {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

/// The on-screen bounding box of an element (like `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width (never negative).
    pub width: f64,
    /// Height (never negative).
    pub height: f64,
}

impl ElementBounds {
    /// Create bounds; negative sizes collapse to zero.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Bounds of the given size centered on `center`.
    pub fn centered_at(center: Point2D, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// The center point of this element.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Check if a point lies within the element (edges inclusive).
    pub fn contains(&self, point: &Point2D) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// The visible viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    /// Size used when the host has not reported one.
    pub const FALLBACK: ViewportSize = ViewportSize {
        width: 1200.0,
        height: 800.0,
    };

    /// Create a size; non-positive or NaN dimensions fall back to the
    /// default viewport.
    pub fn new(width: f64, height: f64) -> Self {
        let width = if width > 0.0 { width } else { Self::FALLBACK.width };
        let height = if height > 0.0 {
            height
        } else {
            Self::FALLBACK.height
        };
        Self { width, height }
    }

    /// The center of the viewport.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bounds covering the whole viewport.
    pub fn bounds(&self) -> ElementBounds {
        ElementBounds::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset_and_distance() {
        let p = Point2D::new(130.0, 40.0);
        let origin = Point2D::new(100.0, 0.0);
        assert_eq!(p.offset_from(&origin), (30.0, 40.0));
        assert!((p.distance_to(&origin) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_lerp_clamps() {
        let a = Point2D::ORIGIN;
        let b = Point2D::new(10.0, 20.0);
        assert_eq!(Point2D::lerp(&a, &b, 0.5), Point2D::new(5.0, 10.0));
        assert_eq!(Point2D::lerp(&a, &b, 3.0), b);
    }

    #[test]
    fn test_bounds_center_and_contains() {
        let bounds = ElementBounds::new(100.0, 200.0, 300.0, 100.0);
        assert_eq!(bounds.center(), Point2D::new(250.0, 250.0));
        assert!(bounds.contains(&Point2D::new(100.0, 300.0)));
        assert!(!bounds.contains(&Point2D::new(99.0, 250.0)));
    }

    #[test]
    fn test_bounds_centered_at() {
        let bounds = ElementBounds::centered_at(Point2D::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(bounds.left, 40.0);
        assert_eq!(bounds.top, 45.0);
        assert_eq!(bounds.center(), Point2D::new(50.0, 50.0));
    }

    #[test]
    fn test_negative_size_collapses() {
        let bounds = ElementBounds::new(0.0, 0.0, -5.0, 10.0);
        assert_eq!(bounds.width, 0.0);
    }

    #[test]
    fn test_viewport_fallback() {
        let size = ViewportSize::new(0.0, f64::NAN);
        assert_eq!(size, ViewportSize::FALLBACK);
        assert_eq!(size.center(), Point2D::new(600.0, 400.0));
    }

    proptest::proptest! {
        #[test]
        fn prop_centered_bounds_roundtrip_center(
            cx in -5000.0f64..5000.0,
            cy in -5000.0f64..5000.0,
            w in 0.0f64..2000.0,
            h in 0.0f64..2000.0,
        ) {
            let bounds = ElementBounds::centered_at(Point2D::new(cx, cy), w, h);
            let center = bounds.center();
            proptest::prop_assert!((center.x - cx).abs() < 1e-6);
            proptest::prop_assert!((center.y - cy).abs() < 1e-6);
            proptest::prop_assert!(bounds.contains(&center));
        }
    }
}
