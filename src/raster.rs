use std::fmt;

use image::RgbaImage;
use log::debug;

use crate::error::ImageDecodeError;

/// The decoded base raster of a document plus its pixel dimensions.
///
/// Immutable once set; loading a new image replaces the whole document.
#[derive(Clone)]
pub struct ImageModel {
    pixels: RgbaImage,
}

impl ImageModel {
    /// Decode an imported image (PNG, JPEG, ...) from its raw bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageDecodeError> {
        let decoded = image::load_from_memory(bytes)?;
        debug!(
            "Decoded base image: {}x{}",
            decoded.width(),
            decoded.height()
        );

        Ok(Self {
            pixels: decoded.to_rgba8(),
        })
    }

    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PartialEq for ImageModel {
    fn eq(&self, other: &Self) -> bool {
        self.pixels.dimensions() == other.pixels.dimensions()
            && self.pixels.as_raw() == other.pixels.as_raw()
    }
}

impl fmt::Debug for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageModel")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixels", &"<raster>")
            .finish()
    }
}
