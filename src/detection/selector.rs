// src/detection/selector.rs
//
// Reduces a detector's per-frame output to at most one candidate.

use crate::geometry::{scale_xy_transform, Quadrilateral, Size};

/// Keep the candidate with the largest perimeter.
///
/// Detectors that report corners normalized to [0, 1] are scaled up to the
/// frame's pixel size so the funnel always works in pixels.
pub fn select_largest(
    candidates: &[Quadrilateral],
    image_size: Size,
    normalized: bool,
) -> Option<Quadrilateral> {
    let largest = candidates
        .iter()
        .max_by(|a, b| a.perimeter().total_cmp(&b.perimeter()))?;

    if normalized {
        Some(largest.apply(&scale_xy_transform(image_size.width, image_size.height)))
    } else {
        Some(*largest)
    }
}
