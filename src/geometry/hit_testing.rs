use crate::object::{Point, RedactionObject, ShapeGeometry};

/// Extra slop around thin geometry so narrow strokes stay selectable.
pub const HIT_TOLERANCE: f32 = 3.0;

/// Calculate distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Point, line_start: Point, line_end: Point) -> f32 {
    let line_dx = line_end.x - line_start.x;
    let line_dy = line_end.y - line_start.y;
    let point_dx = point.x - line_start.x;
    let point_dy = point.y - line_start.y;

    let line_len_sq = line_dx * line_dx + line_dy * line_dy;
    if line_len_sq == 0.0 {
        return (point_dx * point_dx + point_dy * point_dy).sqrt();
    }

    let t = ((point_dx * line_dx + point_dy * line_dy) / line_len_sq).clamp(0.0, 1.0);
    let proj_x = line_start.x + line_dx * t;
    let proj_y = line_start.y + line_dy * t;
    let dx = point.x - proj_x;
    let dy = point.y - proj_y;

    (dx * dx + dy * dy).sqrt()
}

/// Test whether `point` (in image coordinates) hits the object's geometry.
///
/// Rects and ellipses hit on their interior; lines and freehand strokes hit
/// within half their stroke width plus [`HIT_TOLERANCE`]. Line geometry
/// carries its own width precisely so this path never needs the style.
pub fn hit_test(object: &RedactionObject, point: Point) -> bool {
    match &object.shape {
        ShapeGeometry::Rect { .. } => object.shape.bounds().contains(point),

        ShapeGeometry::Ellipse {
            x,
            y,
            width,
            height,
        } => {
            let rx = width / 2.0;
            let ry = height / 2.0;
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }

            let nx = (point.x - (x + rx)) / rx;
            let ny = (point.y - (y + ry)) / ry;
            nx * nx + ny * ny <= 1.0
        }

        ShapeGeometry::Line { x1, y1, x2, y2, width } => {
            let distance =
                distance_to_line_segment(point, Point::new(*x1, *y1), Point::new(*x2, *y2));
            distance <= width / 2.0 + HIT_TOLERANCE
        }

        ShapeGeometry::Freehand { points } => {
            let reach = object.stroke_width() / 2.0 + HIT_TOLERANCE;

            if points.len() == 1 {
                return distance_to_line_segment(point, points[0], points[0]) <= reach;
            }

            points
                .windows(2)
                .any(|pair| distance_to_line_segment(point, pair[0], pair[1]) <= reach)
        }
    }
}
