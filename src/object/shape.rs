use serde::{Deserialize, Serialize};

/// A position in base-image pixel coordinates.
///
/// All geometry in the document lives in this space; screen coordinates
/// never enter the object model. The preview applies one surface-wide
/// scale/offset transform, so image-space geometry is what guarantees
/// preview/export parity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box derived from shape geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).max(0.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Grow the box by `amount` on every side.
    pub fn expanded(&self, amount: f32) -> Bounds {
        Bounds {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

/// The geometry of a drawn shape, tagged by variant.
///
/// Rect and ellipse carry origin + extent, a line carries its endpoints plus
/// its own stroke width (cached on the geometry so hit testing never has to
/// consult the style), and freehand carries the ordered pointer samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Ellipse {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    Freehand {
        points: Vec<Point>,
    },
}

impl ShapeGeometry {
    /// Tight bounding box of the geometry, ignoring stroke width.
    pub fn bounds(&self) -> Bounds {
        match self {
            ShapeGeometry::Rect {
                x,
                y,
                width,
                height,
            }
            | ShapeGeometry::Ellipse {
                x,
                y,
                width,
                height,
            } => Bounds {
                min_x: *x,
                min_y: *y,
                max_x: x + width,
                max_y: y + height,
            },
            ShapeGeometry::Line { x1, y1, x2, y2, .. } => Bounds {
                min_x: x1.min(*x2),
                min_y: y1.min(*y2),
                max_x: x1.max(*x2),
                max_y: y1.max(*y2),
            },
            ShapeGeometry::Freehand { points } => {
                let Some(first) = points.first() else {
                    return Bounds {
                        min_x: 0.0,
                        min_y: 0.0,
                        max_x: 0.0,
                        max_y: 0.0,
                    };
                };

                let mut min_x = first.x;
                let mut min_y = first.y;
                let mut max_x = first.x;
                let mut max_y = first.y;

                for point in points {
                    min_x = min_x.min(point.x);
                    min_y = min_y.min(point.y);
                    max_x = max_x.max(point.x);
                    max_y = max_y.max(point.y);
                }

                Bounds {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                }
            }
        }
    }

    /// The same geometry moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> ShapeGeometry {
        match self {
            ShapeGeometry::Rect {
                x,
                y,
                width,
                height,
            } => ShapeGeometry::Rect {
                x: x + dx,
                y: y + dy,
                width: *width,
                height: *height,
            },
            ShapeGeometry::Ellipse {
                x,
                y,
                width,
                height,
            } => ShapeGeometry::Ellipse {
                x: x + dx,
                y: y + dy,
                width: *width,
                height: *height,
            },
            ShapeGeometry::Line { x1, y1, x2, y2, width } => ShapeGeometry::Line {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
                width: *width,
            },
            ShapeGeometry::Freehand { points } => ShapeGeometry::Freehand {
                points: points
                    .iter()
                    .map(|point| Point::new(point.x + dx, point.y + dy))
                    .collect(),
            },
        }
    }

    /// Stroke width carried by line geometry, if this is a line.
    pub fn line_width(&self) -> Option<f32> {
        match self {
            ShapeGeometry::Line { width, .. } => Some(*width),
            _ => None,
        }
    }

    /// The same geometry with the carried line width replaced.
    ///
    /// Non-line variants are returned unchanged; only lines cache a width.
    pub fn with_line_width(&self, new_width: f32) -> ShapeGeometry {
        match self {
            ShapeGeometry::Line { x1, y1, x2, y2, .. } => ShapeGeometry::Line {
                x1: *x1,
                y1: *y1,
                x2: *x2,
                y2: *y2,
                width: new_width,
            },
            other => other.clone(),
        }
    }
}
