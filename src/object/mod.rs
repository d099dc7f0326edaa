mod shape;
mod style;

use serde::{Deserialize, Serialize};

pub use shape::{Bounds, Point, ShapeGeometry};
pub use style::{
    FillStyle, HexColor, MarkupStyle, PixelateStyle, StyleMode, StyleParams, style_line_width,
    MAX_PIXELATE_ALPHA, MAX_STROKE_WIDTH, MIN_PIXELATE_ALPHA, MIN_STROKE_WIDTH,
};

pub use crate::id_generator::ObjectId;
use crate::id_generator::generate_id;
use crate::util::time;

/// What an object is for, derived from its style mode.
///
/// Redactions cover pixels; markups annotate on top of them. The kind is
/// re-derived whenever the style changes so the two never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Redaction,
    Markup,
}

pub fn mode_to_kind(mode: StyleMode) -> ObjectKind {
    if mode == StyleMode::Mark {
        ObjectKind::Markup
    } else {
        ObjectKind::Redaction
    }
}

/// A shape plus its censoring style, owned by the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub shape: ShapeGeometry,
    pub style: StyleParams,
    pub visible: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

impl RedactionObject {
    /// Create a new object; the kind derives from the style's mode.
    pub fn new(shape: ShapeGeometry, style: StyleParams) -> Self {
        let now = time::timestamp_millis();

        Self {
            id: generate_id(),
            kind: mode_to_kind(style.mode),
            shape,
            style,
            visible: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The stroke width this object is drawn and hit-tested with.
    ///
    /// Line geometry carries its own width; for everything else the width
    /// comes from the style (markup width for markups, line width otherwise).
    pub fn stroke_width(&self) -> f32 {
        if let Some(width) = self.shape.line_width() {
            return width;
        }

        if self.kind == ObjectKind::Markup {
            return self.style.markup.stroke_width as f32;
        }

        self.style.line_width as f32
    }

    /// The same object restyled, with the kind re-derived and, for line
    /// shapes, the geometry-carried width re-synced to the style.
    pub fn with_style(&self, style: &StyleParams, now: u64) -> RedactionObject {
        let kind = mode_to_kind(style.mode);
        let shape = match self.shape {
            ShapeGeometry::Line { .. } => self
                .shape
                .with_line_width(style_line_width(style).round().max(1.0)),
            _ => self.shape.clone(),
        };

        RedactionObject {
            id: self.id,
            kind,
            shape,
            style: *style,
            visible: self.visible,
            created_at: self.created_at,
            updated_at: now,
        }
    }
}
