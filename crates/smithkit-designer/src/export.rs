//! PNG and PDF export of the composed canvas.
//!
//! Both formats start from the same raster (see [`crate::raster`]). The PDF
//! is a single page holding that raster as an image XObject, fitted to the
//! page width and centered.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use smithkit_core::{mm_to_pt, Orientation, PaperSize, Rgb};
use smithkit_settings::Config;

use crate::canvas::Canvas;
use crate::error::{ExportError, ExportResult};
use crate::raster::rasterize;

/// Message shown to the user when PDF export fails.
pub const PDF_FAILURE_MESSAGE: &str =
    "Could not create PDF. Please try again or save as image instead.";

/// Placement of the raster on the PDF page, in millimetres from the top-left
/// corner of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfLayout {
    pub orientation: Orientation,
    pub page_width: f64,
    pub page_height: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PdfLayout {
    /// Fit a `width` x `height` canvas onto `paper`.
    pub fn compute(width: f64, height: f64, paper: PaperSize) -> Self {
        let aspect = width / height;
        let orientation = Orientation::for_aspect_ratio(aspect);
        let (page_width, page_height) = paper.size_mm(orientation);

        let mut img_width = page_width;
        let mut img_height = img_width / aspect;
        if img_height > page_height {
            img_height = page_height;
            img_width = img_height * aspect;
        }

        Self {
            orientation,
            page_width,
            page_height,
            x: (page_width - img_width) / 2.0,
            y: (page_height - img_height) / 2.0,
            width: img_width,
            height: img_height,
        }
    }
}

/// Produces export documents from a canvas.
#[derive(Debug, Clone)]
pub struct ExportAdapter {
    pub png_multiplier: f64,
    pub pdf_multiplier: f64,
    pub background: Rgb,
    pub paper: PaperSize,
    pub png_file_name: String,
    pub pdf_file_name: String,
}

impl ExportAdapter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            png_multiplier: config.export.png_multiplier,
            pdf_multiplier: config.export.pdf_multiplier,
            background: config.canvas.background,
            paper: config.export.paper,
            png_file_name: config.export.png_file_name.clone(),
            pdf_file_name: config.export.pdf_file_name.clone(),
        }
    }

    /// PNG-encoded raster of the whole canvas.
    pub fn encode_png(&self, canvas: &Canvas) -> ExportResult<Vec<u8>> {
        let raster = rasterize(canvas, self.png_multiplier, self.background)?;
        let mut out = Cursor::new(Vec::new());
        raster.write_to(&mut out, ImageFormat::Png)?;
        tracing::info!(
            "Encoded PNG {}x{} ({} bytes)",
            raster.width(),
            raster.height(),
            out.get_ref().len()
        );
        Ok(out.into_inner())
    }

    /// Single-page PDF holding a raster of the whole canvas.
    pub fn encode_pdf(&self, canvas: &Canvas) -> ExportResult<Vec<u8>> {
        let raster = rasterize(canvas, self.pdf_multiplier, self.background)?;
        let layout = PdfLayout::compute(canvas.width(), canvas.height(), self.paper);
        let bytes = build_pdf(&raster, &layout)?;
        tracing::info!(
            "Encoded PDF on {} {} ({} bytes)",
            self.paper,
            layout.orientation,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Write the PNG export into `dir` under the configured file name.
    pub fn save_png(&self, canvas: &Canvas, dir: &Path) -> ExportResult<PathBuf> {
        let bytes = self.encode_png(canvas)?;
        write_export(dir, &self.png_file_name, &bytes)
    }

    /// Write the PDF export into `dir` under the configured file name.
    pub fn save_pdf(&self, canvas: &Canvas, dir: &Path) -> ExportResult<PathBuf> {
        let bytes = self.encode_pdf(canvas)?;
        write_export(dir, &self.pdf_file_name, &bytes)
    }
}

impl Default for ExportAdapter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> ExportResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    tracing::info!("Saved {}", path.display());
    Ok(path)
}

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn build_pdf(raster: &RgbaImage, layout: &PdfLayout) -> ExportResult<Vec<u8>> {
    let rgb: Vec<u8> = raster
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => raster.width() as i64,
            "Height" => raster.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
        },
        rgb,
    ));

    let page_w = mm_to_pt(layout.page_width);
    let page_h = mm_to_pt(layout.page_height);
    let img_w = mm_to_pt(layout.width);
    let img_h = mm_to_pt(layout.height);
    let img_x = mm_to_pt(layout.x);
    // PDF user space grows upward from the bottom of the page
    let img_y = page_h - mm_to_pt(layout.y) - img_h;

    let real = |v: f64| Object::Real(v as _);
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(img_w),
                    real(0.0),
                    real(0.0),
                    real(img_h),
                    real(img_x),
                    real(img_y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().map_err(pdf_err)?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
        "MediaBox" => vec![real(0.0), real(0.0), real(page_w), real(page_h)],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1_i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(pdf_err)?;
    Ok(out)
}
