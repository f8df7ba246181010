// src/pipeline/transform.rs
//
// Coordinate mapping between the three spaces a quadrilateral lives in:
//   - raw image pixels of the landscape sensor frame (Y down)
//   - the portrait overlay/display area
//   - pixels of the final captured photo

use crate::detection::DetectionResult;
use crate::geometry::{
    rotation_transform, scale_transform, translate_transform, Quadrilateral, Rect, Size,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Orientation the capture collaborator reports for a finished photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOrientation {
    #[default]
    Up,
    Left,
    Right,
}

impl ImageOrientation {
    /// Rotation (radians) to bring detection space onto the photo.
    /// Photos come off the sensor as `Right`; nothing else is corrected.
    pub fn rotation_angle(&self) -> f64 {
        match self {
            Self::Right => FRAC_PI_2,
            Self::Up | Self::Left => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// Map a raw detection onto the display area.
///
/// The sensor is landscape while the display is portrait, so the frame is
/// aspect-filled as if portrait, turned a quarter, then centered.
pub fn display_quad(result: &DetectionResult, display_area: Size) -> Quadrilateral {
    let image_size = result.image_size;
    let quad = result.quadrilateral.to_coordinate_system(image_size.height);

    let scale = scale_transform(image_size.swapped(), display_area);
    let rotation = rotation_transform(FRAC_PI_2);
    let image_bounds = Rect::from_size(image_size.apply(&scale)).apply(&rotation);
    let translation = translate_transform(&image_bounds, &Rect::from_size(display_area));

    quad.apply(&(translation * rotation * scale))
}

/// Map the last stabilized detection into the pixel space of the captured
/// photo.
///
/// `result` is taken in raw detection space (image pixels, Y down, relative
/// to `result.image_size`), not in display space.
pub fn capture_quad(
    result: &DetectionResult,
    captured_size: Size,
    orientation: ImageOrientation,
) -> Quadrilateral {
    result.quadrilateral.scale_and_rotate(
        result.image_size,
        captured_size,
        orientation.rotation_angle(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{scale_xy_transform, Point2};
    use approx::assert_abs_diff_eq;

    const FRAME: Size = Size {
        width: 1920.0,
        height: 1080.0,
    };
    const DISPLAY: Size = Size {
        width: 390.0,
        height: 844.0,
    };

    fn assert_point(p: Point2<f64>, x: f64, y: f64) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-6);
    }

    fn frame_corners() -> Quadrilateral {
        Quadrilateral::from_corners([[0.0, 0.0], [1920.0, 0.0], [1920.0, 1080.0], [0.0, 1080.0]])
    }

    #[test]
    fn test_frame_center_maps_to_display_center() {
        let center = Quadrilateral::from_corners([[960.0, 540.0]; 4]);
        let out = display_quad(&DetectionResult::new(center, FRAME), DISPLAY);
        for c in out.corners() {
            assert_point(c, 195.0, 422.0);
        }
    }

    #[test]
    fn test_display_mapping_of_frame_corners() {
        // portrait (1080x1920) aspect-filled into 390x844 → scale 844/1920
        let s = 844.0 / 1920.0;
        let scaled_h = 1080.0 * s;
        let dx = 195.0 + scaled_h / 2.0;

        let out = display_quad(&DetectionResult::new(frame_corners(), FRAME), DISPLAY);
        // image top-left is the Cartesian (0, H) corner
        assert_point(out.top_left, dx - scaled_h, 0.0);
        assert_point(out.top_right, dx - scaled_h, 844.0);
        assert_point(out.bottom_right, dx, 844.0);
        assert_point(out.bottom_left, dx, 0.0);
    }

    #[test]
    fn test_display_mapping_fills_long_axis() {
        let out = display_quad(&DetectionResult::new(frame_corners(), FRAME), DISPLAY);
        let span_y = out.top_right.y - out.top_left.y;
        let span_x = out.bottom_left.x - out.top_left.x;
        assert_abs_diff_eq!(span_y, 844.0, epsilon = 1e-6);
        assert!(span_x >= 390.0);
    }

    #[test]
    fn test_capture_upright_is_plain_scale() {
        let quad = Quadrilateral::from_corners([[100.0, 50.0], [900.0, 60.0], [880.0, 700.0], [120.0, 690.0]]);
        let result = DetectionResult::new(quad, FRAME);
        let captured = Size::new(3840.0, 2160.0);

        let out = capture_quad(&result, captured, ImageOrientation::Up);
        let expected = quad.apply(&scale_xy_transform(2.0, 2.0));
        for (a, b) in out.corners().iter().zip(expected.corners().iter()) {
            assert_point(*a, b.x, b.y);
        }
        assert_eq!(
            capture_quad(&result, captured, ImageOrientation::Left),
            out
        );
    }

    #[test]
    fn test_capture_right_rotates_into_portrait_photo() {
        let result = DetectionResult::new(frame_corners(), FRAME);
        let out = capture_quad(&result, Size::new(3024.0, 4032.0), ImageOrientation::Right);
        assert_point(out.top_left, 2646.0, -672.0);
        assert_point(out.bottom_right, 378.0, 4704.0);

        let center = Quadrilateral::from_corners([[960.0, 540.0]; 4]);
        let out = capture_quad(
            &DetectionResult::new(center, FRAME),
            Size::new(3024.0, 4032.0),
            ImageOrientation::Right,
        );
        assert_point(out.bottom_left, 1512.0, 2016.0);
    }

    #[test]
    fn test_zero_size_frame_maps_to_non_finite_quad() {
        // the clamp keeps the scale from being 0/0, but an infinite scale
        // still cannot place the frame; callers must check is_finite
        let quad = Quadrilateral::from_corners([[1.0, 1.0]; 4]);
        let out = display_quad(&DetectionResult::new(quad, Size::new(0.0, 0.0)), DISPLAY);
        assert!(!out.is_finite());
    }

    #[test]
    fn test_orientation_angles() {
        assert_eq!(ImageOrientation::Up.rotation_angle(), 0.0);
        assert_eq!(ImageOrientation::Left.rotation_angle(), 0.0);
        assert_eq!(ImageOrientation::Right.rotation_angle(), FRAC_PI_2);
    }
}
