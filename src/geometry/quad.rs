// src/geometry/quad.rs

use super::rect::{Rect, Size};
use super::transform::{apply_point, rotation_transform, scale_xy_transform, translate_transform};
use nalgebra::{Matrix3, Point2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Four corners of a detected document-like region.
///
/// Corners are stored in the order the detector reports them; nothing here
/// enforces convexity or orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub top_left: Point2<f64>,
    pub top_right: Point2<f64>,
    pub bottom_right: Point2<f64>,
    pub bottom_left: Point2<f64>,
}

impl Quadrilateral {
    pub fn new(
        top_left: Point2<f64>,
        top_right: Point2<f64>,
        bottom_right: Point2<f64>,
        bottom_left: Point2<f64>,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Build from `[tl, tr, br, bl]` as `[x, y]` pairs.
    pub fn from_corners(corners: [[f64; 2]; 4]) -> Self {
        let [tl, tr, br, bl] = corners.map(|[x, y]| Point2::new(x, y));
        Self::new(tl, tr, br, bl)
    }

    pub fn corners(&self) -> [Point2<f64>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Closed outline: tl → tr → br → bl → tl.
    pub fn path(&self) -> [Point2<f64>; 5] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
            self.top_left,
        ]
    }

    /// False if any coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.corners()
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite())
    }

    pub fn apply(&self, m: &Matrix3<f64>) -> Self {
        let [tl, tr, br, bl] = self.corners().map(|c| apply_point(m, &c));
        Self::new(tl, tr, br, bl)
    }

    /// Sum of the four edge lengths in stored corner order.
    pub fn perimeter(&self) -> f64 {
        self.path().windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// True if every corner of `other` lies inside the axis-aligned square of
    /// side `threshold` centered on the matching corner of `self`.
    ///
    /// The square is closed, so the test is reflexive for `threshold >= 0`
    /// and symmetric in its two quadrilaterals.
    pub fn is_within(&self, threshold: f64, other: &Quadrilateral) -> bool {
        let half = threshold / 2.0;
        self.corners()
            .iter()
            .zip(other.corners().iter())
            .all(|(a, b)| (b.x - a.x).abs() <= half && (b.y - a.y).abs() <= half)
    }

    /// Flip every Y against `height`: image space (Y down) <-> Cartesian
    /// space (Y up). Applying it twice restores the input.
    pub fn to_coordinate_system(&self, height: f64) -> Self {
        let flip = |p: Point2<f64>| Point2::new(p.x, height - p.y);
        Self::new(
            flip(self.top_left),
            flip(self.top_right),
            flip(self.bottom_right),
            flip(self.bottom_left),
        )
    }

    /// Map corners from a region of `from` size into one of `to` size,
    /// optionally rotating by `angle` radians.
    ///
    /// A quarter-turn exchanges the source axes before the per-axis scale
    /// factors are taken. After rotating, the rotated source bounds are
    /// re-centered on the destination.
    pub fn scale_and_rotate(&self, from: Size, to: Size, angle: f64) -> Self {
        let rotated = angle != 0.0;
        let mut divisor = from.clamped_nonzero();
        if rotated && angle != PI {
            divisor = divisor.swapped();
        }

        let scale = scale_xy_transform(to.width / divisor.width, to.height / divisor.height);
        let scaled = self.apply(&scale);
        if !rotated {
            return scaled;
        }

        let rotation = rotation_transform(angle);
        let from_bounds = Rect::from_size(from).apply(&scale).apply(&rotation);
        let translation = translate_transform(&from_bounds, &Rect::from_size(to));
        scaled.apply(&rotation).apply(&translation)
    }
}

impl std::fmt::Display for Quadrilateral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tl=({:.1}, {:.1}) tr=({:.1}, {:.1}) br=({:.1}, {:.1}) bl=({:.1}, {:.1})",
            self.top_left.x,
            self.top_left.y,
            self.top_right.x,
            self.top_right.y,
            self.bottom_right.x,
            self.bottom_right.y,
            self.bottom_left.x,
            self.bottom_left.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn square(x: f64, y: f64, side: f64) -> Quadrilateral {
        Quadrilateral::from_corners([[x, y], [x + side, y], [x + side, y + side], [x, y + side]])
    }

    fn assert_point(p: Point2<f64>, x: f64, y: f64) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-6);
    }

    #[test]
    fn test_perimeter_of_square() {
        assert_abs_diff_eq!(square(5.0, 5.0, 10.0).perimeter(), 40.0);
    }

    #[test]
    fn test_perimeter_uses_all_edges() {
        let q = Quadrilateral::from_corners([[0.0, 0.0], [3.0, 0.0], [3.0, 4.0], [0.0, 4.0]]);
        assert_abs_diff_eq!(q.perimeter(), 14.0);
    }

    #[test]
    fn test_path_is_closed() {
        let q = square(0.0, 0.0, 1.0);
        let path = q.path();
        assert_eq!(path[0], path[4]);
        assert_eq!(path[2], q.bottom_right);
    }

    #[test]
    fn test_is_within_reflexive_and_symmetric() {
        let a = square(100.0, 100.0, 50.0);
        let b = square(103.0, 98.0, 50.0);
        for t in [0.0, 1.0, 6.0, 40.0] {
            assert!(a.is_within(t, &a));
            assert_eq!(a.is_within(t, &b), b.is_within(t, &a));
        }
        assert!(!a.is_within(5.0, &b));
        assert!(a.is_within(6.0, &b));
    }

    #[test]
    fn test_is_within_requires_every_corner() {
        let a = square(0.0, 0.0, 100.0);
        let mut b = a;
        b.bottom_left.y += 30.0;
        assert!(!a.is_within(40.0, &b));
        assert!(a.is_within(60.0, &b));
    }

    #[test]
    fn test_coordinate_flip_round_trip() {
        let q = Quadrilateral::from_corners([[1.5, 2.0], [10.0, 3.25], [9.0, 700.0], [0.0, 650.5]]);
        let flipped = q.to_coordinate_system(1080.0);
        assert_point(flipped.top_left, 1.5, 1078.0);
        assert_eq!(flipped.to_coordinate_system(1080.0), q);
    }

    #[test]
    fn test_apply_translation() {
        let m = Matrix3::new(1.0, 0.0, 5.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0);
        let q = square(0.0, 0.0, 1.0).apply(&m);
        assert_point(q.top_left, 5.0, -2.0);
        assert_point(q.bottom_right, 6.0, -1.0);
    }

    #[test]
    fn test_scale_without_rotation_is_per_axis() {
        let q = square(50.0, 50.0, 10.0);
        let out = q.scale_and_rotate(Size::new(100.0, 200.0), Size::new(200.0, 600.0), 0.0);
        assert_point(out.top_left, 100.0, 150.0);
        assert_point(out.bottom_right, 120.0, 180.0);
    }

    #[test]
    fn test_scale_with_quarter_turn() {
        // per-axis factors come from the swapped source (3024/1080, 4032/1920)
        // while the centered bounds use the unswapped one
        let q = Quadrilateral::from_corners([[0.0, 0.0], [1920.0, 0.0], [1920.0, 1080.0], [0.0, 1080.0]]);
        let out = q.scale_and_rotate(
            Size::new(1920.0, 1080.0),
            Size::new(3024.0, 4032.0),
            FRAC_PI_2,
        );
        assert_point(out.top_left, 2646.0, -672.0);
        assert_point(out.top_right, 2646.0, 4704.0);
        assert_point(out.bottom_right, 378.0, 4704.0);
        assert_point(out.bottom_left, 378.0, -672.0);
    }

    #[test]
    fn test_quarter_turn_keeps_centers_aligned() {
        let center = Quadrilateral::from_corners([[960.0, 540.0]; 4]);
        let out = center.scale_and_rotate(
            Size::new(1920.0, 1080.0),
            Size::new(3024.0, 4032.0),
            FRAC_PI_2,
        );
        for c in out.corners() {
            assert_point(c, 1512.0, 2016.0);
        }
    }

    #[test]
    fn test_half_turn_keeps_axes() {
        let center = Quadrilateral::from_corners([[50.0, 100.0]; 4]);
        let out = center.scale_and_rotate(Size::new(100.0, 200.0), Size::new(300.0, 400.0), PI);
        assert_point(out.top_left, 150.0, 200.0);
    }

    #[test]
    fn test_scale_with_zero_source_dimension() {
        let q = Quadrilateral::from_corners([[0.0, 0.0], [0.0, 10.0], [0.0, 20.0], [0.0, 30.0]]);
        let out = q.scale_and_rotate(Size::new(0.0, 100.0), Size::new(0.0, 200.0), 0.0);
        for c in out.corners() {
            assert!(c.x.is_finite() && c.y.is_finite());
        }
        assert_point(out.bottom_left, 0.0, 60.0);
    }

    #[test]
    fn test_zero_source_into_real_destination_blows_up_that_axis() {
        // the clamp avoids 0/0 but 100 / MIN_POSITIVE still overflows
        let q = Quadrilateral::from_corners([[0.0, 0.0], [5.0, 10.0], [5.0, 20.0], [0.0, 30.0]]);
        let out = q.scale_and_rotate(Size::new(0.0, 100.0), Size::new(100.0, 200.0), 0.0);
        assert!(out.top_left.x.is_nan());
        assert!(out.top_right.x.is_infinite());
        assert_abs_diff_eq!(out.bottom_left.y, 60.0);
        assert!(!out.is_finite());
    }

    #[test]
    fn test_is_finite() {
        assert!(square(0.0, 0.0, 1.0).is_finite());
        let mut q = square(0.0, 0.0, 1.0);
        q.bottom_right.y = f64::NAN;
        assert!(!q.is_finite());
    }
}
