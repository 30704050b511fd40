//! SmithKit Settings Crate
//!
//! Handles application configuration: loading, saving and validating the
//! canvas, style, chart, export and resize sections.

pub mod config;
pub mod error;

pub use config::{
    CanvasSettings, ChartSettings, Config, DrawingSettings, ExportSettings, ReloadPolicy,
    ResizeSettings, StyleDefaults,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
