//! Canvas rasterizer
//! Paints every canvas object, in paint order, into an RGBA buffer using tiny-skia.
//!
//! Geometry comes from each shape's lyon outline; text is drawn from rusttype
//! glyph outlines and bitmaps are resampled with bilinear filtering. The
//! output is in canvas coordinates scaled by the export multiplier; the
//! interactive viewport (zoom, pan) does not apply.

use image::RgbaImage;
use lyon::path::Event;
use rusttype::{point as rt_point, OutlineBuilder, Scale};
use smithkit_core::Rgb;
use tiny_skia::{
    Color, FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};

use crate::canvas::{Canvas, DrawingObject};
use crate::error::{ExportError, ExportResult};
use crate::font_manager;
use crate::model::{DesignImage, DesignText, DesignerShape, Shape};
use crate::style::ShapeStyle;

/// Output size for a canvas of `width` x `height` at `multiplier`.
pub fn raster_size(width: f64, height: f64, multiplier: f64) -> (u32, u32) {
    (
        (width * multiplier).ceil().max(0.0) as u32,
        (height * multiplier).ceil().max(0.0) as u32,
    )
}

/// Render the whole canvas on a solid `background`.
pub fn rasterize(canvas: &Canvas, multiplier: f64, background: Rgb) -> ExportResult<RgbaImage> {
    let (width, height) = raster_size(canvas.width(), canvas.height(), multiplier);
    let mut pixmap =
        Pixmap::new(width, height).ok_or(ExportError::RasterAllocation { width, height })?;
    pixmap.fill(color(background));

    let transform = Transform::from_scale(multiplier as f32, multiplier as f32);
    for obj in canvas.shapes() {
        draw_object(&mut pixmap, obj, transform);
    }

    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(width, height, data).ok_or(ExportError::RasterAllocation { width, height })
}

fn color(rgb: Rgb) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
}

fn paint_for(rgb: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgb));
    paint.anti_alias = true;
    paint
}

fn stroke_for(style: &ShapeStyle) -> Stroke {
    Stroke {
        width: style.stroke_width.px() as f32,
        dash: style
            .dash
            .and_then(|d| StrokeDash::new(vec![d.on as f32, d.off as f32], 0.0)),
        ..Default::default()
    }
}

fn draw_object(pixmap: &mut Pixmap, obj: &DrawingObject, transform: Transform) {
    match &obj.shape {
        Shape::Text(text) => draw_text(pixmap, text, &obj.style, transform),
        Shape::Image(image) => draw_image(pixmap, image, transform),
        shape => {
            let Some(path) = to_skia_path(&shape.render()) else {
                return;
            };
            if let Some(fill) = obj.style.fill {
                pixmap.fill_path(&path, &paint_for(fill), FillRule::Winding, transform, None);
            }
            pixmap.stroke_path(
                &path,
                &paint_for(obj.style.stroke),
                &stroke_for(&obj.style),
                transform,
                None,
            );
        }
    }
}

/// Convert a lyon path to a tiny-skia path.
pub(crate) fn to_skia_path(path: &lyon::path::Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => pb.move_to(at.x, at.y),
            Event::Line { to, .. } => pb.line_to(to.x, to.y),
            Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    pb.finish()
}

struct GlyphOutline<'a> {
    pb: &'a mut PathBuilder,
}

impl OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

fn draw_text(pixmap: &mut Pixmap, text: &DesignText, style: &ShapeStyle, transform: Transform) {
    let font = font_manager::get_font_for(font_manager::DEFAULT_FAMILY, text.bold, false);

    let scale = Scale::uniform(text.font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let (x1, y1, _, _) = text.layout_box();
    let origin = rt_point(x1 as f32, y1 as f32 + v_metrics.ascent);

    let mut pb = PathBuilder::new();
    for glyph in font.layout(&text.text, scale, origin) {
        glyph.build_outline(&mut GlyphOutline { pb: &mut pb });
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let rotation = Transform::from_rotate_at(
        text.rotation as f32,
        text.position.x as f32,
        text.position.y as f32,
    );
    let fill = style.fill.unwrap_or(style.stroke);
    pixmap.fill_path(
        &path,
        &paint_for(fill),
        FillRule::Winding,
        transform.pre_concat(rotation),
        None,
    );
}

/// Copy an RGBA bitmap into a premultiplied pixmap.
fn to_pixmap(bitmap: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(bitmap.width(), bitmap.height())?;
    let data = bitmap
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            let premul = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            [premul(r), premul(g), premul(b), a]
        })
        .collect();
    Pixmap::from_vec(data, size)
}

fn draw_image(pixmap: &mut Pixmap, image: &DesignImage, transform: Transform) {
    let Some(source) = to_pixmap(&image.bitmap) else {
        tracing::warn!("Skipping empty chart bitmap");
        return;
    };
    let top_left = image.top_left();
    let placement = transform
        .pre_translate(top_left.x as f32, top_left.y as f32)
        .pre_scale(image.scale as f32, image.scale as f32);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, placement, None);
}
