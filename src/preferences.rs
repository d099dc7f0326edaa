//! Persisted editor preferences.
//!
//! A versioned `{version, defaultTool, defaultStyle}` record stored under a
//! fixed key. Loading validates and clamps every field independently and
//! falls back field-by-field to the defaults, so malformed stored data can
//! never break startup.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::object::{
    FillStyle, HexColor, MarkupStyle, PixelateStyle, StyleMode, StyleParams,
    MAX_PIXELATE_ALPHA, MAX_STROKE_WIDTH, MIN_PIXELATE_ALPHA, MIN_STROKE_WIDTH,
};
use crate::pixelate::{MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
use crate::tool::ToolType;

/// Fixed storage key; the record lives at `<dir>/<key>.json`.
pub const STORAGE_KEY_PREFERENCES: &str = "pixelveil-preferences";

pub const PREFERENCES_VERSION: u32 = 1;

/// Errors that can occur while writing preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to serialize preferences: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write preferences: {0}")]
    Write(#[from] std::io::Error),
}

/// The persisted preference record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub version: u32,
    pub default_tool: ToolType,
    pub default_style: StyleParams,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            default_tool: ToolType::default(),
            default_style: StyleParams::default(),
        }
    }
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    /// Directory where the preference record is stored
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY_PREFERENCES}.json"))
    }

    /// Load the stored record. Never fails: a missing or malformed file
    /// yields the defaults, and every present field is validated on its own.
    pub fn load(&self) -> Preferences {
        let raw = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(_) => return Preferences::default(),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => sanitize(&value),
            Err(err) => {
                warn!("Ignoring malformed preference data: {err}");
                Preferences::default()
            }
        }
    }

    /// Write the record, normalized the same way loading normalizes it so
    /// the stored values are always in range.
    pub fn save(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        fs::create_dir_all(&self.dir)?;

        let normalized = sanitize(&serde_json::to_value(preferences)?);
        let json = serde_json::to_string_pretty(&normalized)?;
        fs::write(self.path(), json)?;
        Ok(())
    }
}

/// Build a valid record from arbitrary JSON, field by field.
pub fn sanitize(raw: &Value) -> Preferences {
    Preferences {
        version: PREFERENCES_VERSION,
        default_tool: normalize_tool(raw.get("defaultTool")),
        default_style: normalize_style(raw.get("defaultStyle")),
    }
}

fn normalize_tool(value: Option<&Value>) -> ToolType {
    match value.and_then(Value::as_str) {
        Some("select") => ToolType::Select,
        Some("rect") => ToolType::Rect,
        Some("ellipse") => ToolType::Ellipse,
        Some("line") => ToolType::Line,
        Some("freehand") => ToolType::Freehand,
        _ => ToolType::default(),
    }
}

fn normalize_mode(value: Option<&Value>) -> StyleMode {
    match value.and_then(Value::as_str) {
        Some("pixelate") => StyleMode::Pixelate,
        Some("mark") => StyleMode::Mark,
        // "solid" is the legacy spelling of the fill mode.
        Some("fill") | Some("solid") => StyleMode::Fill,
        _ => StyleParams::default().mode,
    }
}

fn normalize_style(value: Option<&Value>) -> StyleParams {
    let defaults = StyleParams::default();
    let empty = Value::Null;
    let candidate = value.unwrap_or(&empty);

    let pixelate = candidate.get("pixelate");
    let fill = candidate.get("fill");
    let markup = candidate.get("markup");

    StyleParams {
        mode: normalize_mode(candidate.get("mode")),
        pixelate: PixelateStyle {
            block_size: rounded_in_range(
                pixelate.and_then(|v| v.get("blockSize")),
                MIN_BLOCK_SIZE,
                MAX_BLOCK_SIZE,
                defaults.pixelate.block_size,
            ),
            alpha: decimal_in_range(
                pixelate.and_then(|v| v.get("alpha")),
                MIN_PIXELATE_ALPHA,
                MAX_PIXELATE_ALPHA,
                defaults.pixelate.alpha,
            ),
        },
        fill: FillStyle {
            color: hex_color_or(fill.and_then(|v| v.get("color")), defaults.fill.color),
        },
        markup: MarkupStyle {
            stroke_color: hex_color_or(
                markup.and_then(|v| v.get("strokeColor")),
                defaults.markup.stroke_color,
            ),
            stroke_width: rounded_in_range(
                markup.and_then(|v| v.get("strokeWidth")),
                MIN_STROKE_WIDTH,
                MAX_STROKE_WIDTH,
                defaults.markup.stroke_width,
            ),
        },
        line_width: rounded_in_range(
            candidate.get("lineWidth"),
            MIN_STROKE_WIDTH,
            MAX_STROKE_WIDTH,
            defaults.line_width,
        ),
    }
}

/// A finite number, accepting numeric strings the way the stored data may
/// contain them.
fn read_number(value: Option<&Value>) -> Option<f64> {
    let value = value?;

    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

fn rounded_in_range(value: Option<&Value>, min: u32, max: u32, fallback: u32) -> u32 {
    match read_number(value) {
        Some(parsed) => parsed.round().clamp(min as f64, max as f64) as u32,
        None => fallback,
    }
}

fn decimal_in_range(value: Option<&Value>, min: f32, max: f32, fallback: f32) -> f32 {
    match read_number(value) {
        Some(parsed) => (parsed as f32).clamp(min, max),
        None => fallback,
    }
}

fn hex_color_or(value: Option<&Value>, fallback: HexColor) -> HexColor {
    value
        .and_then(Value::as_str)
        .and_then(|text| text.parse().ok())
        .unwrap_or(fallback)
}
