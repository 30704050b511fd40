//! Error handling for SmithKit core types
//!
//! Value parsing errors raised while reading colours, stroke settings and
//! paper sizes from user input or configuration files.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Colour string is not `#rgb` or `#rrggbb`
    #[error("Invalid colour '{value}': expected #rrggbb")]
    InvalidColor {
        /// The rejected input.
        value: String,
    },

    /// Stroke width must be a positive integer
    #[error("Invalid stroke width {value}: must be a positive integer")]
    InvalidStrokeWidth {
        /// The rejected width.
        value: i64,
    },

    /// Line style name is unknown
    #[error("Unknown line style '{value}': expected solid, dashed or dotted")]
    UnknownLineStyle {
        /// The rejected input.
        value: String,
    },

    /// Paper size name is unknown
    #[error("Unknown paper size '{value}'")]
    UnknownPaperSize {
        /// The rejected input.
        value: String,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
