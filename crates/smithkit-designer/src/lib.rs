//! # SmithKit Designer
//!
//! Interactive drawing on top of a Smith chart.
//!
//! Provides the retained canvas object model, the drawing tools and their
//! click sequencing, shape construction from the current style, the Smith
//! chart generator, and PNG/PDF export.

pub mod canvas;
pub mod chart;
pub mod error;
pub mod export;
pub mod factory;
pub mod font_manager;
pub mod model;
pub mod prompt;
pub mod raster;
pub mod reload;
pub mod selection_manager;
pub mod session;
pub mod shape_store;
pub mod style;
pub mod tools;
pub mod viewport;

pub use canvas::{Canvas, DrawingObject};
pub use chart::{chart_primitives, ReactanceArc, ResistanceCircle, SmithChart, CHART_VALUES};
pub use error::{DesignerError, ExportError, ExportResult};
pub use export::{ExportAdapter, PdfLayout, PDF_FAILURE_MESSAGE};
pub use factory::{ShapeFactory, ShapeSpec};
pub use model::{
    normalize_angle, ArcFlags, DesignArc, DesignCircle, DesignImage, DesignLine, DesignText,
    DesignerShape, Point, Shape, ShapeType, TextAnchor,
};
pub use prompt::{ScriptedPrompt, UserPrompt};
pub use raster::rasterize;
pub use reload::ReloadScheduler;
pub use session::{DrawingSession, Key, Modifiers, CLEAR_CONFIRMATION};
pub use style::{ShapeStyle, StyleSettings, StyleUpdate};
pub use tools::{InProgress, SelectGesture, Tool, ToolOutcome, ToolStateMachine, TEXT_PROMPT};
pub use viewport::Viewport;
