//! # SmithKit
//!
//! Drawing on top of a Smith (impedance/admittance) chart, headless.
//!
//! ## Architecture
//!
//! SmithKit is organized as a workspace with multiple crates:
//!
//! 1. **smithkit-core** - Colours, stroke widths, line styles, paper units
//! 2. **smithkit-settings** - Configuration file loading and validation
//! 3. **smithkit-designer** - Canvas, drawing tools, Smith chart, export
//! 4. **smithkit** - This crate: logging setup and the script-driven binary

pub mod script;

pub use smithkit_core::{DashPattern, LineStyle, Orientation, PaperSize, Rgb, StrokeWidth};
pub use smithkit_designer as designer;
pub use smithkit_designer::{
    Canvas, DrawingSession, ExportAdapter, Key, Modifiers, Point, ScriptedPrompt, Shape,
    SmithChart, StyleSettings, StyleUpdate, Tool, ToolStateMachine, UserPrompt,
};
pub use smithkit_settings::{Config, ReloadPolicy, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
