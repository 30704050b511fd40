//! Paper units for document export
//!
//! Page sizes are kept in millimetres, the unit the export layout is
//! computed in, and converted to PDF points only when the document is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// PDF points per millimetre (72 pt per inch, 25.4 mm per inch).
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall
    Landscape,
}

impl Orientation {
    /// Landscape only when the content is strictly wider than tall.
    pub fn for_aspect_ratio(aspect: f64) -> Self {
        if aspect > 1.0 {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// ISO A4, 210 x 297 mm
    #[default]
    A4,
    /// ISO A3, 297 x 420 mm
    A3,
    /// US Letter, 215.9 x 279.4 mm
    Letter,
}

impl PaperSize {
    /// Portrait `(width, height)` in millimetres.
    pub fn portrait_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::Letter => (215.9, 279.4),
        }
    }

    /// `(width, height)` in millimetres for the given orientation.
    pub fn size_mm(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.portrait_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => write!(f, "A4"),
            Self::A3 => write!(f, "A3"),
            Self::Letter => write!(f, "Letter"),
        }
    }
}

impl FromStr for PaperSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "letter" | "us-letter" => Ok(Self::Letter),
            _ => Err(Error::UnknownPaperSize {
                value: s.to_string(),
            }),
        }
    }
}
