//! The composite renderer.
//!
//! Everything is composed once, at the base image's native resolution, in
//! the collection's paint order. The export path encodes that composite
//! directly; the preview path draws the very same composite onto a surface
//! through one contain-fit transform. No object is ever positioned in
//! surface coordinates, which is what keeps preview and export identical.

mod geometry;

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use log::debug;
use tiny_skia::{
    FillRule, FilterQuality, LineCap, LineJoin, Paint, Path, Pixmap, PixmapPaint, Stroke,
    Transform,
};

pub use geometry::ellipse_from_bounds;

use crate::document::EditorDocument;
use crate::error::ExportError;
use crate::object::{Point, RedactionObject, ShapeGeometry, StyleMode};
use crate::pixelate;
use crate::raster::ImageModel;

/// Opt-in knobs for the composite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    /// Apply the color-quantization companion pass after block averaging.
    pub quantize: bool,
}

/// The single uniform scale + centering offset mapping image space onto a
/// preview surface ("contain" fit: the image is fully visible, never cropped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainFit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ContainFit {
    pub fn compute(
        image_width: u32,
        image_height: u32,
        surface_width: u32,
        surface_height: u32,
    ) -> Self {
        let scale_x = surface_width as f32 / image_width as f32;
        let scale_y = surface_height as f32 / image_height as f32;
        let scale = scale_x.min(scale_y);

        Self {
            scale,
            offset_x: (surface_width as f32 - image_width as f32 * scale) / 2.0,
            offset_y: (surface_height as f32 - image_height as f32 * scale) / 2.0,
        }
    }

    pub fn to_surface(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    pub fn to_image(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }
}

/// Compose the base image and objects at native resolution.
///
/// Objects paint back to front; the pending draft, when present, always
/// paints last since its final z position is only decided on commit.
pub fn render_composite(
    image: &ImageModel,
    objects: &[RedactionObject],
    pending_draft: Option<&RedactionObject>,
    options: RenderOptions,
) -> RgbaImage {
    let Some(mut pixmap) = pixmap_from_image(image.pixels()) else {
        return image.pixels().clone();
    };

    for object in objects.iter().filter(|object| object.visible) {
        draw_object(&mut pixmap, object, options);
    }

    if let Some(draft) = pending_draft {
        draw_object(&mut pixmap, draft, options);
    }

    image_from_pixmap(&pixmap)
}

/// Compose the current document, draft included. `None` without an image.
pub fn render_document(document: &EditorDocument, options: RenderOptions) -> Option<RgbaImage> {
    document.image.as_ref().map(|image| {
        render_composite(
            image,
            &document.objects,
            document.pending_draft.as_ref(),
            options,
        )
    })
}

/// Render the live preview: the native-resolution composite drawn onto a
/// `surface_width` x `surface_height` surface with a contain fit.
///
/// Returns the surface pixels and the fit so the host can map pointer input
/// back into image space. `None` without an image or with an empty surface.
pub fn render_preview(
    document: &EditorDocument,
    surface_width: u32,
    surface_height: u32,
    options: RenderOptions,
) -> Option<(RgbaImage, ContainFit)> {
    let image = document.image.as_ref()?;
    let composite = render_composite(
        image,
        &document.objects,
        document.pending_draft.as_ref(),
        options,
    );

    let fit = ContainFit::compute(
        image.width(),
        image.height(),
        surface_width,
        surface_height,
    );
    let mut surface = Pixmap::new(surface_width, surface_height)?;
    let composite_pixmap = pixmap_from_image(&composite)?;

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    surface.draw_pixmap(
        0,
        0,
        composite_pixmap.as_ref(),
        &paint,
        Transform::from_row(fit.scale, 0.0, 0.0, fit.scale, fit.offset_x, fit.offset_y),
        None,
    );

    Some((image_from_pixmap(&surface), fit))
}

/// One-shot export of the committed document as an encoded PNG.
///
/// Returns `Ok(None)` when no image is loaded; encode failures surface as
/// [`ExportError`]. The pending draft is uncommitted and never exported.
pub fn export_png(
    document: &EditorDocument,
    options: RenderOptions,
) -> Result<Option<Vec<u8>>, ExportError> {
    let Some(image) = document.image.as_ref() else {
        debug!("Export requested with no image loaded");
        return Ok(None);
    };

    let composite = render_composite(image, &document.objects, None, options);
    let mut cursor = Cursor::new(Vec::new());
    composite.write_to(&mut cursor, ImageFormat::Png)?;

    let encoded = cursor.into_inner();
    debug!(
        "Exported {}x{} PNG ({} bytes)",
        image.width(),
        image.height(),
        encoded.len()
    );
    Ok(Some(encoded))
}

/// A shape's coverage region: either a filled interior or a stroked band.
enum ShapeRegion {
    Filled(Path),
    Stroked(Path, f32),
}

fn shape_region(object: &RedactionObject) -> Option<ShapeRegion> {
    match &object.shape {
        ShapeGeometry::Rect {
            x,
            y,
            width,
            height,
        } => geometry::rect_path(*x, *y, *width, *height).map(ShapeRegion::Filled),

        ShapeGeometry::Ellipse {
            x,
            y,
            width,
            height,
        } => {
            let (cx, cy, rx, ry) = ellipse_from_bounds(*x, *y, *width, *height);
            geometry::ellipse_path(cx, cy, rx, ry).map(ShapeRegion::Filled)
        }

        ShapeGeometry::Line { x1, y1, x2, y2, width } => {
            geometry::line_path(*x1, *y1, *x2, *y2).map(|path| ShapeRegion::Stroked(path, *width))
        }

        ShapeGeometry::Freehand { points } => geometry::polyline_path(points)
            .map(|path| ShapeRegion::Stroked(path, object.stroke_width())),
    }
}

/// The shape's outline path, for markup strokes.
fn shape_outline_path(object: &RedactionObject) -> Option<Path> {
    match &object.shape {
        ShapeGeometry::Rect {
            x,
            y,
            width,
            height,
        } => geometry::rect_path(*x, *y, *width, *height),

        ShapeGeometry::Ellipse {
            x,
            y,
            width,
            height,
        } => {
            let (cx, cy, rx, ry) = ellipse_from_bounds(*x, *y, *width, *height);
            geometry::ellipse_path(cx, cy, rx, ry)
        }

        ShapeGeometry::Line { x1, y1, x2, y2, .. } => geometry::line_path(*x1, *y1, *x2, *y2),

        ShapeGeometry::Freehand { points } => geometry::polyline_path(points),
    }
}

fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

fn solid_paint(channels: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(channels[0], channels[1], channels[2], 255);
    paint.anti_alias = true;
    paint
}

fn draw_object(pixmap: &mut Pixmap, object: &RedactionObject, options: RenderOptions) {
    match object.style.mode {
        StyleMode::Fill => draw_fill(pixmap, object),
        StyleMode::Mark => draw_markup(pixmap, object),
        StyleMode::Pixelate => draw_pixelated(pixmap, object, options),
    }
}

fn draw_fill(pixmap: &mut Pixmap, object: &RedactionObject) {
    let paint = solid_paint(object.style.fill.color.channels());

    match shape_region(object) {
        Some(ShapeRegion::Filled(path)) => {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        Some(ShapeRegion::Stroked(path, width)) => {
            pixmap.stroke_path(&path, &paint, &round_stroke(width), Transform::identity(), None);
        }
        None => {}
    }
}

/// Markups stroke the outline only; they never cover pixels.
fn draw_markup(pixmap: &mut Pixmap, object: &RedactionObject) {
    let paint = solid_paint(object.style.markup.stroke_color.channels());

    if let Some(path) = shape_outline_path(object) {
        pixmap.stroke_path(
            &path,
            &paint,
            &round_stroke(object.stroke_width()),
            Transform::identity(),
            None,
        );
    }
}

/// Pixelate the composite pixels under the shape, blended by the style's
/// alpha within the shape's anti-aliased coverage.
fn draw_pixelated(pixmap: &mut Pixmap, object: &RedactionObject, options: RenderOptions) {
    let style = object.style.pixelate;

    // Filled regions tile from the shape's own origin; stroked regions pad
    // out to cover the stroke band and its round caps.
    let pad = match object.shape {
        ShapeGeometry::Line { .. } | ShapeGeometry::Freehand { .. } => {
            object.stroke_width() / 2.0 + 1.0
        }
        _ => 0.0,
    };
    let bounds = object.shape.bounds().expanded(pad);

    let x0 = (bounds.min_x.floor() as i32).max(0);
    let y0 = (bounds.min_y.floor() as i32).max(0);
    let x1 = (bounds.max_x.ceil() as i32).min(pixmap.width() as i32);
    let y1 = (bounds.max_y.ceil() as i32).min(pixmap.height() as i32);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    let (x0, y0) = (x0 as u32, y0 as u32);
    let (region_width, region_height) = ((x1 as u32) - x0, (y1 as u32) - y0);

    let region = copy_region(pixmap, x0, y0, region_width, region_height);
    let mut blurred = pixelate::pixelate(&region, style.block_size);
    if options.quantize {
        pixelate::quantize(&mut blurred, style.block_size);
    }

    let Some(mask) = shape_mask(object, x0, y0, region_width, region_height) else {
        return;
    };

    blend_region(pixmap, &region, &blurred, &mask, x0, y0, style.alpha);
}

/// Rasterize the shape's coverage into a region-local alpha mask.
fn shape_mask(
    object: &RedactionObject,
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
) -> Option<Pixmap> {
    let mut mask = Pixmap::new(width, height)?;
    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;

    let to_local = Transform::from_translate(-(x0 as f32), -(y0 as f32));

    match shape_region(object)? {
        ShapeRegion::Filled(path) => {
            mask.fill_path(&path, &paint, FillRule::Winding, to_local, None);
        }
        ShapeRegion::Stroked(path, stroke_width) => {
            mask.stroke_path(&path, &paint, &round_stroke(stroke_width), to_local, None);
        }
    }

    Some(mask)
}

/// Write `blurred` over the region, weighted per pixel by mask coverage
/// times the style alpha.
fn blend_region(
    pixmap: &mut Pixmap,
    original: &RgbaImage,
    blurred: &RgbaImage,
    mask: &Pixmap,
    x0: u32,
    y0: u32,
    alpha: f32,
) {
    let pixmap_width = pixmap.width();
    let pixels = pixmap.pixels_mut();
    let mask_pixels = mask.pixels();

    for y in 0..original.height() {
        for x in 0..original.width() {
            let coverage = mask_pixels[(y * original.width() + x) as usize].alpha() as f32 / 255.0;
            let weight = coverage * alpha;
            if weight <= 0.0 {
                continue;
            }

            let src = original.get_pixel(x, y).0;
            let mix = blurred.get_pixel(x, y).0;
            let mut out = [0u8; 4];
            for channel in 0..4 {
                let base = src[channel] as f32;
                out[channel] = (base + (mix[channel] as f32 - base) * weight).round() as u8;
            }

            let index = ((y0 + y) * pixmap_width + x0 + x) as usize;
            pixels[index] =
                tiny_skia::ColorU8::from_rgba(out[0], out[1], out[2], out[3]).premultiply();
        }
    }
}

/// Copy a pixmap region out as straight (non-premultiplied) RGBA.
fn copy_region(pixmap: &Pixmap, x0: u32, y0: u32, width: u32, height: u32) -> RgbaImage {
    let pixels = pixmap.pixels();
    let pixmap_width = pixmap.width();

    RgbaImage::from_fn(width, height, |x, y| {
        let color = pixels[((y0 + y) * pixmap_width + x0 + x) as usize].demultiply();
        image::Rgba([color.red(), color.green(), color.blue(), color.alpha()])
    })
}

fn pixmap_from_image(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;

    for (src, out) in image.pixels().zip(pixmap.pixels_mut().iter_mut()) {
        let [r, g, b, a] = src.0;
        *out = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Some(pixmap)
}

fn image_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());

    for (dst, src) in out.pixels_mut().zip(pixmap.pixels().iter()) {
        let color = src.demultiply();
        dst.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }

    out
}
