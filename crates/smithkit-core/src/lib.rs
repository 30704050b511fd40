//! # SmithKit Core
//!
//! Core value types shared across SmithKit crates:
//! colours, stroke widths, line styles and dash patterns, and the paper
//! units used by document export.

pub mod error;
pub mod style;
pub mod units;

pub use error::{Error, Result};
pub use style::{DashPattern, LineStyle, Rgb, StrokeWidth};
pub use units::{mm_to_pt, Orientation, PaperSize, POINTS_PER_MM};
