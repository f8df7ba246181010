// src/geometry/transform.rs
//
// 2D affine transforms in homogeneous form: M * [x, y, 1]^T.

use super::rect::{Rect, Size};
use nalgebra::{Matrix3, Point2, Vector3};

/// Map a point through an affine transform.
pub fn apply_point(m: &Matrix3<f64>, p: &Point2<f64>) -> Point2<f64> {
    let v = m * Vector3::new(p.x, p.y, 1.0);
    Point2::new(v[0], v[1])
}

/// Uniform aspect-fill scale: the larger of the two axis ratios wins, so
/// `from` fully covers `to` (possibly overflowing one axis). Zero source
/// dimensions are clamped to the smallest positive value.
pub fn scale_transform(from: Size, aspect_fill_in: Size) -> Matrix3<f64> {
    let from = from.clamped_nonzero();
    let scale = (aspect_fill_in.width / from.width).max(aspect_fill_in.height / from.height);
    scale_xy_transform(scale, scale)
}

pub fn scale_xy_transform(sx: f64, sy: f64) -> Matrix3<f64> {
    Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
}

/// Counter-clockwise rotation about the origin.
pub fn rotation_transform(angle: f64) -> Matrix3<f64> {
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
}

/// Pure translation moving the center of `from` onto the center of `to`.
pub fn translate_transform(from: &Rect, to: &Rect) -> Matrix3<f64> {
    let from_mid = from.mid();
    let to_mid = to.mid();
    Matrix3::new(
        1.0,
        0.0,
        to_mid.x - from_mid.x,
        0.0,
        1.0,
        to_mid.y - from_mid.y,
        0.0,
        0.0,
        1.0,
    )
}
