use serde::{Deserialize, Serialize};

/// The interaction tool driving pointer input.
///
/// Tools themselves live in the UI layer; the engine only needs to know
/// which one is active, because switching away from `Select` clears the
/// selection and any pending draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    Select,
    #[default]
    Rect,
    Ellipse,
    Line,
    Freehand,
}

impl ToolType {
    pub fn is_select(&self) -> bool {
        matches!(self, ToolType::Select)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolType::Select => "select",
            ToolType::Rect => "rect",
            ToolType::Ellipse => "ellipse",
            ToolType::Line => "line",
            ToolType::Freehand => "freehand",
        }
    }
}
