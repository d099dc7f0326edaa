use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::pixelate;

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 128;
pub const MIN_PIXELATE_ALPHA: f32 = 0.1;
pub const MAX_PIXELATE_ALPHA: f32 = 1.0;

/// The censoring treatment applied within an object's shape region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Block-average the pixels under the shape.
    Pixelate,
    /// Paint the shape's interior with a flat color.
    Fill,
    /// Stroke the shape outline as an annotation; covers nothing.
    Mark,
}

/// A 6-digit hex color such as `#1a2b3c`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn channels(&self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for HexColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(())?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(());
        }

        let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| ())?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| ())?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| ())?;
        Ok(Self([r, g, b]))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexColorVisitor;

        impl Visitor<'_> for HexColorVisitor {
            type Value = HexColor;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 6-digit hex color string like \"#1a2b3c\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<HexColor, E> {
                value
                    .parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(HexColorVisitor)
    }
}

/// Settings for `StyleMode::Pixelate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelateStyle {
    pub block_size: u32,
    pub alpha: f32,
}

/// Settings for `StyleMode::Fill`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillStyle {
    pub color: HexColor,
}

/// Settings for `StyleMode::Mark`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupStyle {
    pub stroke_color: HexColor,
    pub stroke_width: u32,
}

/// The live style configuration for new objects.
///
/// All three mode sub-configs are always present regardless of the active
/// mode, so switching modes never loses prior settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleParams {
    pub mode: StyleMode,
    pub pixelate: PixelateStyle,
    pub fill: FillStyle,
    pub markup: MarkupStyle,
    pub line_width: u32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            mode: StyleMode::Pixelate,
            pixelate: PixelateStyle {
                block_size: pixelate::DEFAULT_BLOCK_SIZE,
                alpha: 1.0,
            },
            fill: FillStyle {
                color: HexColor::rgb(0x00, 0x00, 0x00),
            },
            markup: MarkupStyle {
                stroke_color: HexColor::rgb(0xff, 0x00, 0x00),
                stroke_width: 6,
            },
            line_width: 24,
        }
    }
}

/// The stroke width a new line/freehand shape should carry for this style.
pub fn style_line_width(style: &StyleParams) -> f32 {
    let width = if style.mode == StyleMode::Mark {
        style.markup.stroke_width
    } else {
        style.line_width
    };

    (width as f32).max(MIN_STROKE_WIDTH as f32)
}
