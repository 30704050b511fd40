//! Configuration for SmithKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas size and background colour
//! - Initial stroke style for new shapes
//! - Smith chart source and proportions
//! - Drawing behaviour (degenerate shapes, hit tolerance)
//! - Export resolution, file names and paper
//! - Resize reload policy

use serde::{Deserialize, Serialize};
use smithkit_core::{LineStyle, PaperSize, Rgb, StrokeWidth};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Solid colour behind everything, also used for exports
    pub background: Rgb,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: Rgb::WHITE,
        }
    }
}

/// Initial stroke style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    pub stroke_width: StrokeWidth,
    pub stroke_color: Rgb,
    pub line_style: LineStyle,
}

/// Smith chart settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Optional chart bitmap placed behind the generated grid
    pub image: Option<PathBuf>,
    /// Chart radius as a fraction of the smaller canvas dimension
    pub radius_fraction: f64,
    /// Bitmap height as a fraction of the canvas height
    pub image_height_fraction: f64,
    /// Generate the programmatic grid even when a bitmap is loaded
    pub draw_grid: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            image: None,
            radius_fraction: 0.45,
            image_height_fraction: 0.9,
            draw_grid: true,
        }
    }
}

/// Drawing behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Accept zero-radius circles, zero-length lines and zero-radius arcs
    pub allow_degenerate_shapes: bool,
    /// Pick distance in canvas pixels for selection and eraser hits
    pub hit_tolerance: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            allow_degenerate_shapes: true,
            hit_tolerance: 4.0,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Resolution multiplier for PNG export
    pub png_multiplier: f64,
    /// Resolution multiplier for the raster embedded in PDF export
    pub pdf_multiplier: f64,
    pub png_file_name: String,
    pub pdf_file_name: String,
    pub paper: PaperSize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            png_multiplier: 2.0,
            pdf_multiplier: 1.5,
            png_file_name: "smith-chart-drawing.png".to_string(),
            pdf_file_name: "smith-chart-drawing.pdf".to_string(),
            paper: PaperSize::A4,
        }
    }
}

/// How resize-triggered chart reloads are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Each resize restarts the delay; only the latest size is reloaded
    #[default]
    Debounce,
    /// Each resize schedules its own reload; all of them run in order
    FixedDelay,
}

impl std::fmt::Display for ReloadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debounce => write!(f, "debounce"),
            Self::FixedDelay => write!(f, "fixed_delay"),
        }
    }
}

/// Resize handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    pub policy: ReloadPolicy,
    pub delay_ms: u64,
}

impl ResizeSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            policy: ReloadPolicy::Debounce,
            delay_ms: 200,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub style: StyleDefaults,
    pub chart: ChartSettings,
    pub drawing: DrawingSettings,
    pub export: ExportSettings,
    pub resize: ResizeSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration directory, e.g. `~/.config/smithkit` on Linux.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("smithkit"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Default config file location.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the default config file, falling back to defaults when it is absent.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match ConfigFormat::for_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::for_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(out_of_range(
                "canvas",
                format!("{}x{}", self.canvas.width, self.canvas.height),
            ));
        }

        check_fraction("chart.radius_fraction", self.chart.radius_fraction)?;
        check_fraction(
            "chart.image_height_fraction",
            self.chart.image_height_fraction,
        )?;

        if !(self.drawing.hit_tolerance >= 0.0) {
            return Err(out_of_range(
                "drawing.hit_tolerance",
                self.drawing.hit_tolerance.to_string(),
            ));
        }

        check_positive("export.png_multiplier", self.export.png_multiplier)?;
        check_positive("export.pdf_multiplier", self.export.pdf_multiplier)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn for_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn out_of_range(key: &str, value: String) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value,
    }
}

fn check_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(key, value.to_string()))
    }
}

fn check_fraction(key: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(out_of_range(key, value.to_string()))
    }
}
