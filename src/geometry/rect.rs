// src/geometry/rect.rs

use super::transform::apply_point;
use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width and height exchanged (landscape <-> portrait).
    pub fn swapped(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Zero dimensions replaced by the smallest positive normal value so
    /// the size can be used as a divisor.
    pub fn clamped_nonzero(&self) -> Self {
        let clamp = |v: f64| if v == 0.0 { f64::MIN_POSITIVE } else { v };
        Self::new(clamp(self.width), clamp(self.height))
    }

    /// Map the size as a vector; translation is ignored and components may
    /// come out negative under rotation.
    pub fn apply(&self, m: &Matrix3<f64>) -> Self {
        let v = m * Vector3::new(self.width, self.height, 0.0);
        Self::new(v[0], v[1])
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point2<f64>,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point2<f64>, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(Point2::origin(), size)
    }

    pub fn mid(&self) -> Point2<f64> {
        Point2::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    fn corners(&self) -> [Point2<f64>; 4] {
        let (x, y) = (self.origin.x, self.origin.y);
        let (w, h) = (self.size.width, self.size.height);
        [
            Point2::new(x, y),
            Point2::new(x + w, y),
            Point2::new(x + w, y + h),
            Point2::new(x, y + h),
        ]
    }

    /// Bounding box of the four transformed corners.
    pub fn apply(&self, m: &Matrix3<f64>) -> Self {
        let mapped = self.corners().map(|c| apply_point(m, &c));
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &mapped {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(Point2::new(min_x, min_y), Size::new(max_x - min_x, max_y - min_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rotation_transform;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotated_bounds() {
        let r = Rect::from_size(Size::new(40.0, 10.0)).apply(&rotation_transform(FRAC_PI_2));
        assert_abs_diff_eq!(r.origin.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.origin.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.size.width, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.size.height, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clamped_nonzero() {
        let s = Size::new(0.0, 5.0).clamped_nonzero();
        assert_eq!(s.width, f64::MIN_POSITIVE);
        assert_eq!(s.height, 5.0);
    }
}
