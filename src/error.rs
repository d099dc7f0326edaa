use thiserror::Error;

/// Failure while decoding an imported raster image.
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Failure while encoding the export raster.
///
/// A missing base image is not an error; export signals that case as an
/// empty result instead.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode export raster: {0}")]
    Encode(#[from] image::ImageError),
}
