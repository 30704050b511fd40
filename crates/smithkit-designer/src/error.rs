//! Error types for the designer crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading chart assets.
#[derive(Error, Debug)]
pub enum DesignerError {
    /// The chart bitmap could not be opened or decoded.
    #[error("Failed to load chart image {path}: {source}")]
    ChartImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors raised while rasterizing or encoding an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The raster buffer could not be allocated.
    #[error("Cannot allocate a {width}x{height} raster")]
    RasterAllocation { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    /// The PDF document could not be built or serialized.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// Writing the export to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
