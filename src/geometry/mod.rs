// src/geometry/mod.rs
//
// Value types and affine helpers shared by the funnel and the
// coordinate-transform pipeline. Everything here is pure.

mod quad;
mod rect;
mod transform;

pub use quad::Quadrilateral;
pub use rect::{Rect, Size};
pub use transform::{
    apply_point, rotation_transform, scale_transform, scale_xy_transform, translate_transform,
};

pub use nalgebra::{Matrix3, Point2};
