//! The pixelation kernel: the intensity curve, block averaging, and the
//! optional color quantization companion pass.

use image::RgbaImage;

pub const MIN_INTENSITY: f64 = 0.0;
pub const MAX_INTENSITY: f64 = 100.0;
pub const MIN_BLOCK_SIZE: u32 = 2;
pub const MAX_BLOCK_SIZE: u32 = 20;
pub const DEFAULT_BLOCK_SIZE: u32 = 8;

/// Block sizes above this are reachable only by direct numeric entry, never
/// through the intensity control.
const CURVE_MAX_BLOCK_SIZE: u32 = 16;
const CURVE_EXPONENT: f64 = 1.2;

fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

/// Round and clamp an arbitrary block size into `[MIN_BLOCK_SIZE, MAX_BLOCK_SIZE]`.
pub fn clamp_block_size(block_size: f64) -> u32 {
    let rounded = block_size.round();
    rounded.clamp(MIN_BLOCK_SIZE as f64, MAX_BLOCK_SIZE as f64) as u32
}

/// Map slider intensity (0..=100) to a block size in pixels.
///
/// The `t^1.2` curve keeps the ramp gentle near zero so small adjustments at
/// the low end stay perceptible.
pub fn intensity_to_block_size(intensity: f64) -> u32 {
    let t = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY) / MAX_INTENSITY;
    let curved = t.powf(CURVE_EXPONENT);

    clamp_block_size(lerp(
        MIN_BLOCK_SIZE as f64,
        CURVE_MAX_BLOCK_SIZE as f64,
        curved,
    ))
}

/// Inverse of [`intensity_to_block_size`] over the curve's own range.
///
/// Inputs are clamped to `[2, 16]` first: block sizes 17..=20 exist only via
/// direct numeric entry, so the inverse intentionally does not round-trip
/// them. Within `[2, 16]` the round trip lands within 1 of the input.
pub fn block_size_to_intensity(block_size: u32) -> u32 {
    let clamped = block_size.clamp(MIN_BLOCK_SIZE, CURVE_MAX_BLOCK_SIZE);
    let normalized =
        (clamped - MIN_BLOCK_SIZE) as f64 / (CURVE_MAX_BLOCK_SIZE - MIN_BLOCK_SIZE) as f64;
    let t = normalized.powf(1.0 / CURVE_EXPONENT);

    (t * MAX_INTENSITY).round().clamp(MIN_INTENSITY, MAX_INTENSITY) as u32
}

/// Replace every pixel with the mean of its containing `block_size` tile.
///
/// Tiles are anchored at the buffer origin and clipped at the right/bottom
/// edges; a clipped tile still averages correctly over its actual extent.
/// All four channels are averaged independently with integer rounding.
pub fn pixelate(source: &RgbaImage, block_size: u32) -> RgbaImage {
    let block_size = clamp_block_size(block_size as f64);
    let (width, height) = source.dimensions();
    let mut output = source.clone();

    let mut block_y = 0;
    while block_y < height {
        let block_end_y = (block_y + block_size).min(height);

        let mut block_x = 0;
        while block_x < width {
            let block_end_x = (block_x + block_size).min(width);

            let mut totals = [0u64; 4];
            let mut count = 0u64;

            for y in block_y..block_end_y {
                for x in block_x..block_end_x {
                    let pixel = source.get_pixel(x, y);
                    for (total, channel) in totals.iter_mut().zip(pixel.0) {
                        *total += channel as u64;
                    }
                    count += 1;
                }
            }

            if count > 0 {
                let mean = image::Rgba(
                    totals.map(|total| (total as f64 / count as f64).round() as u8),
                );

                for y in block_y..block_end_y {
                    for x in block_x..block_end_x {
                        output.put_pixel(x, y, mean);
                    }
                }
            }

            block_x += block_size;
        }
        block_y += block_size;
    }

    output
}

/// Number of quantization levels for a block size: coarser blocks get fewer
/// levels, clamped to `[4, 6]`.
fn quantize_levels(block_size: u32) -> u32 {
    let normalized = (clamp_block_size(block_size as f64) - MIN_BLOCK_SIZE) as f64
        / (MAX_BLOCK_SIZE - MIN_BLOCK_SIZE) as f64;

    (6.0 - normalized * 2.0).round().clamp(4.0, 6.0) as u32
}

fn quantize_channel(value: u8, levels: u32) -> u8 {
    let step = 255.0 / (levels - 1) as f64;

    ((value as f64 / step).round() * step).round() as u8
}

/// Snap every color channel to the nearest of the evenly spaced levels for
/// this block size; alpha is left alone. Opt-in companion to [`pixelate`];
/// the plain block average is the default redaction transform.
pub fn quantize(buffer: &mut RgbaImage, block_size: u32) {
    let levels = quantize_levels(block_size);

    for pixel in buffer.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            *channel = quantize_channel(*channel, levels);
        }
    }
}
