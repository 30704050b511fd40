//! The drawing session: one canvas, its chart, the active tool and style.
//!
//! [`DrawingSession`] is the command surface a host (toolbar, script, test)
//! drives. Pointer coordinates are host pixels and go through the canvas
//! viewport before reaching the tools.

use std::path::{Path, PathBuf};
use std::time::Instant;

use smithkit_settings::Config;

use crate::canvas::Canvas;
use crate::chart::SmithChart;
use crate::error::ExportResult;
use crate::export::{ExportAdapter, PDF_FAILURE_MESSAGE};
use crate::model::Point;
use crate::prompt::UserPrompt;
use crate::reload::ReloadScheduler;
use crate::style::{StyleSettings, StyleUpdate};
use crate::tools::{Tool, ToolOutcome, ToolStateMachine};

/// Confirmation asked before clearing the canvas.
pub const CLEAR_CONFIRMATION: &str =
    "Are you sure you want to clear the canvas? This action cannot be undone.";

/// Keys the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Other(String),
}

impl Key {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "delete" | "del" => Key::Delete,
            "backspace" => Key::Backspace,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Add to or toggle the selection instead of replacing it.
    pub shift: bool,
}

pub struct DrawingSession<P: UserPrompt> {
    config: Config,
    canvas: Canvas,
    tools: ToolStateMachine,
    style: StyleSettings,
    chart: SmithChart,
    reload: ReloadScheduler,
    exporter: ExportAdapter,
    prompt: P,
    status: String,
}

impl<P: UserPrompt> DrawingSession<P> {
    /// New session with the chart generated for the configured canvas size.
    pub fn new(config: Config, prompt: P) -> Self {
        let chart = SmithChart::new(&config.chart);
        Self::with_chart(config, chart, prompt)
    }

    /// New session around an already loaded chart.
    pub fn with_chart(config: Config, mut chart: SmithChart, prompt: P) -> Self {
        let mut canvas = Canvas::with_size(
            config.canvas.width as f64,
            config.canvas.height as f64,
        );
        chart.regenerate(&mut canvas);

        let mut tools = ToolStateMachine::new(
            config.drawing.allow_degenerate_shapes,
            config.drawing.hit_tolerance,
        );
        tools.set_tool(Tool::Select, &mut canvas);

        tracing::info!(
            "Drawing session ready ({}x{}, reload policy {})",
            config.canvas.width,
            config.canvas.height,
            config.resize.policy
        );

        Self {
            style: StyleSettings::from(&config.style),
            reload: ReloadScheduler::from(&config.resize),
            exporter: ExportAdapter::from_config(&config),
            config,
            canvas,
            tools,
            chart,
            prompt,
            status: "Ready".to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn tool(&self) -> Tool {
        self.tools.tool()
    }

    pub fn tools(&self) -> &ToolStateMachine {
        &self.tools
    }

    pub fn style(&self) -> &StyleSettings {
        &self.style
    }

    pub fn chart(&self) -> &SmithChart {
        &self.chart
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn exporter(&self) -> &ExportAdapter {
        &self.exporter
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        tracing::debug!("Status: {}", self.status);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        let hint = self.tools.set_tool(tool, &mut self.canvas);
        self.set_status(hint);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> ToolOutcome {
        self.pointer_down_with(x, y, Modifiers::default())
    }

    pub fn pointer_down_with(&mut self, x: f64, y: f64, modifiers: Modifiers) -> ToolOutcome {
        let point = self.canvas.pixel_to_canvas(x, y);
        let outcome = self.tools.pointer_down(
            &mut self.canvas,
            &self.style,
            &mut self.prompt,
            point,
            modifiers.shift,
        );
        self.report(&outcome);
        outcome
    }

    /// Returns `true` when a preview or the selection moved.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let point = self.canvas.pixel_to_canvas(x, y);
        self.tools.pointer_move(&mut self.canvas, &self.style, point)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> ToolOutcome {
        let point = self.canvas.pixel_to_canvas(x, y);
        let outcome = self.tools.pointer_up(&mut self.canvas, point);
        self.report(&outcome);
        outcome
    }

    fn report(&mut self, outcome: &ToolOutcome) {
        if let Some(message) = outcome.status_message() {
            self.set_status(message);
        }
    }

    /// Delete or Backspace in selection mode removes the selected user
    /// shapes. Returns the number removed.
    pub fn key_down(&mut self, key: &Key) -> usize {
        if !matches!(key, Key::Delete | Key::Backspace) || self.tool() != Tool::Select {
            return 0;
        }

        let selected = self.canvas.selected_ids();
        if selected.is_empty() {
            return 0;
        }

        let removed = selected
            .into_iter()
            .filter(|id| self.canvas.remove_user_shape(*id).is_some())
            .count();
        self.canvas.deselect_all();
        self.set_status(format!("Deleted {} object(s)", removed));
        tracing::info!("Deleted {} selected object(s)", removed);
        removed
    }

    /// Merge `update` into the current style; in selection mode the selected
    /// shapes are restyled too. Returns the number of restyled shapes.
    pub fn update_settings(&mut self, update: StyleUpdate) -> usize {
        if update.is_empty() {
            return 0;
        }
        self.style.merge(&update);

        if self.tool() != Tool::Select {
            return 0;
        }

        let mut touched = 0;
        for obj in self.canvas.shapes_mut() {
            if obj.selected && !obj.permanent {
                update.apply_to(&mut obj.style);
                touched += 1;
            }
        }
        if touched > 0 {
            tracing::debug!("Restyled {} selected object(s)", touched);
        }
        touched
    }

    /// Remove every user shape after confirmation. The chart stays.
    pub fn clear_all(&mut self) -> bool {
        if !self.prompt.confirm(CLEAR_CONFIRMATION) {
            return false;
        }
        self.tools.reset(&mut self.canvas);
        let removed = self.canvas.clear_user_shapes();
        tracing::info!("Canvas cleared ({} objects), Smith chart preserved", removed);
        self.set_status("Canvas cleared");
        true
    }

    pub fn export_png(&self) -> ExportResult<Vec<u8>> {
        self.exporter.encode_png(&self.canvas)
    }

    /// PDF bytes, or `None` after alerting the user.
    pub fn export_pdf(&mut self) -> Option<Vec<u8>> {
        match self.exporter.encode_pdf(&self.canvas) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                self.pdf_failed(&e);
                None
            }
        }
    }

    pub fn save_png(&mut self, dir: &Path) -> ExportResult<PathBuf> {
        let path = self.exporter.save_png(&self.canvas, dir)?;
        self.set_status(format!("Saved {}", path.display()));
        Ok(path)
    }

    pub fn save_pdf(&mut self, dir: &Path) -> Option<PathBuf> {
        match self.exporter.save_pdf(&self.canvas, dir) {
            Ok(path) => {
                self.set_status(format!("Saved {}", path.display()));
                Some(path)
            }
            Err(e) => {
                self.pdf_failed(&e);
                None
            }
        }
    }

    fn pdf_failed(&mut self, error: &dyn std::error::Error) {
        tracing::error!("Error creating PDF: {}", error);
        self.prompt.alert(PDF_FAILURE_MESSAGE);
    }

    /// Resize the canvas; the chart is rebuilt once the reload comes due.
    pub fn resize(&mut self, width: f64, height: f64, now: Instant) {
        self.canvas.set_size(width, height);
        self.reload.schedule((width, height), now);
        tracing::debug!("Canvas resized to {}x{}", width, height);
    }

    /// Run every reload due at `now`. Returns how many ran.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.reload.due(now);
        for (width, height) in &due {
            tracing::debug!("Reloading chart scheduled for {}x{}", width, height);
            self.chart.regenerate(&mut self.canvas);
        }
        due.len()
    }

    pub fn pending_reloads(&self) -> usize {
        self.reload.pending_count()
    }

    /// Chart id list for inspection.
    pub fn chart_ids(&self) -> Vec<u64> {
        let mut ids = self.chart.primitive_ids().to_vec();
        ids.extend(self.chart.background_id());
        ids
    }

    /// Translate host pixels to canvas coordinates.
    pub fn to_canvas(&self, x: f64, y: f64) -> Point {
        self.canvas.pixel_to_canvas(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;

    fn session() -> DrawingSession<ScriptedPrompt> {
        DrawingSession::new(Config::default(), ScriptedPrompt::accepting())
    }

    #[test]
    fn test_starts_in_select_mode_with_chart() {
        let s = session();
        assert_eq!(s.status(), "Ready");
        assert_eq!(s.tool(), Tool::Select);
        assert!(!s.chart_ids().is_empty());
        assert!(s.canvas().shapes().all(|o| o.permanent));
    }

    #[test]
    fn test_tool_change_sets_hint() {
        let mut s = session();
        s.set_tool(Tool::Eraser);
        assert_eq!(s.status(), "Eraser tool: Click on objects to remove them");
    }

    #[test]
    fn test_delete_ignored_outside_select_mode() {
        let mut s = session();
        s.set_tool(Tool::Line);
        assert_eq!(s.key_down(&Key::Delete), 0);
    }

    #[test]
    fn test_declined_clear_keeps_shapes() {
        let mut s = DrawingSession::new(Config::default(), ScriptedPrompt::new());
        s.set_tool(Tool::Line);
        s.pointer_down(10.0, 10.0);
        s.pointer_down(20.0, 20.0);
        let before = s.canvas().shape_count();
        assert!(!s.clear_all());
        assert_eq!(s.canvas().shape_count(), before);
        assert_eq!(s.prompt().prompts, vec![CLEAR_CONFIRMATION.to_string()]);
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse("Delete"), Key::Delete);
        assert_eq!(Key::parse("backspace"), Key::Backspace);
        assert_eq!(Key::parse("x"), Key::Other("x".into()));
    }
}
