//! Path construction shared by every draw mode of the composite renderer.

use tiny_skia::{Path, PathBuilder};

use crate::object::Point;

/// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
const BEZIER_K: f32 = 0.552_284_8;

/// Calculate ellipse center and radii from an origin + extent box.
#[inline]
pub fn ellipse_from_bounds(x: f32, y: f32, width: f32, height: f32) -> (f32, f32, f32, f32) {
    let rx = (width * 0.5).max(0.5);
    let ry = (height * 0.5).max(0.5);
    (x + width * 0.5, y + height * 0.5, rx, ry)
}

pub(crate) fn rect_path(x: f32, y: f32, width: f32, height: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x, y);
    pb.line_to(x + width, y);
    pb.line_to(x + width, y + height);
    pb.line_to(x, y + height);
    pb.close();
    pb.finish()
}

/// Build an ellipse path using cubic bezier curves
pub(crate) fn ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<Path> {
    let kx = rx * BEZIER_K;
    let ky = ry * BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - ry);

    // Top to right
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);

    // Right to bottom
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);

    // Bottom to left
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);

    // Left to top
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);

    pb.close();
    pb.finish()
}

pub(crate) fn line_path(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x1, y1);
    pb.line_to(x2, y2);
    pb.finish()
}

pub(crate) fn polyline_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);

    if rest.is_empty() {
        // A single tap still leaves a dot under a round cap.
        pb.line_to(first.x + 0.01, first.y);
    }

    for point in rest {
        pb.line_to(point.x, point.y);
    }

    pb.finish()
}
