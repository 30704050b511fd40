//! Tool selection and the per-tool click sequencing.
//!
//! Each drawing tool is a small state machine driven by pointer-down events:
//! circles and lines take two clicks, arcs take three. Between clicks the
//! in-progress shape is kept on the canvas as a preview and updated on
//! pointer movement. The preview objects are ordinary canvas objects that are
//! never interactive, so they cannot be picked before the final click.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::factory::ShapeFactory;
use crate::model::{DesignCircle, DesignLine, Point, Shape, ShapeType};
use crate::prompt::UserPrompt;
use crate::style::StyleSettings;

/// Prompt shown by the text tool.
pub const TEXT_PROMPT: &str = "Enter text:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Text,
    Circle,
    Arc,
    Line,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Text,
        Tool::Circle,
        Tool::Arc,
        Tool::Line,
        Tool::Eraser,
    ];

    /// Status line shown when the tool becomes active.
    pub fn hint(self) -> &'static str {
        match self {
            Tool::Select => "Selection mode: Click objects to select or drag to select multiple",
            Tool::Text => "Text tool: Click where you want to add text",
            Tool::Circle => {
                "Circle tool: Click to set center point, then click again to set radius"
            }
            Tool::Arc => "Arc tool: Click to set center, then radius, then end angle",
            Tool::Line => {
                "Line tool: Click to set start point, then click again to set end point"
            }
            Tool::Eraser => "Eraser tool: Click on objects to remove them",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Select => "select",
            Tool::Text => "text",
            Tool::Circle => "circle",
            Tool::Arc => "arc",
            Tool::Line => "line",
            Tool::Eraser => "eraser",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

/// Shape under construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InProgress {
    #[default]
    Idle,
    /// Center fixed, radius follows the pointer.
    Circle { center: Point, preview: u64 },
    /// Start fixed, end follows the pointer.
    Line { start: Point, preview: u64 },
    /// Center fixed, a guide follows the pointer to pick radius and start angle.
    ArcRadius { center: Point, guide: u64 },
    /// Radius and start angle fixed, the end angle follows the pointer.
    ArcSweep {
        center: Point,
        radius: f64,
        start_angle: f64,
        current_angle: f64,
        start_guide: u64,
        end_guide: u64,
        candidate: Option<u64>,
    },
}

impl InProgress {
    /// Clicks received so far for the current shape.
    pub fn step(&self) -> u8 {
        match self {
            InProgress::Idle => 0,
            InProgress::Circle { .. } | InProgress::Line { .. } | InProgress::ArcRadius { .. } => 1,
            InProgress::ArcSweep { .. } => 2,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InProgress::Idle)
    }

    /// Canvas objects that exist only for the construction.
    pub fn temporary_ids(&self) -> Vec<u64> {
        match self {
            InProgress::Idle => Vec::new(),
            InProgress::Circle { preview, .. } | InProgress::Line { preview, .. } => {
                vec![*preview]
            }
            InProgress::ArcRadius { guide, .. } => vec![*guide],
            InProgress::ArcSweep {
                start_guide,
                end_guide,
                candidate,
                ..
            } => {
                let mut ids = vec![*start_guide, *end_guide];
                ids.extend(candidate);
                ids
            }
        }
    }
}

/// Pointer gesture of the selection tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectGesture {
    /// Dragging the selection; `last` is the previous pointer position.
    Move { last: Point },
    /// Rubber-band rectangle from `origin` to `current`.
    Band {
        origin: Point,
        current: Point,
        additive: bool,
    },
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Nothing changed.
    Ignored,
    /// A construction step was taken; `step` clicks have been received.
    Advanced { tool: Tool, step: u8 },
    /// A shape was completed and left on the canvas.
    Committed { id: u64, kind: ShapeType },
    /// The click would have produced a zero-size shape.
    Degenerate { kind: ShapeType },
    Erased { id: u64 },
    /// The eraser hit a permanent object.
    EraseRefused,
    /// The selection changed or was moved.
    Selection { count: usize },
}

impl ToolOutcome {
    /// Status line for this outcome, if it warrants one.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            ToolOutcome::Ignored | ToolOutcome::Selection { .. } => None,
            ToolOutcome::Advanced { tool, step } => match (tool, step) {
                (Tool::Circle, _) => Some("Move to preview, click to set radius"),
                (Tool::Line, _) => Some("Move to preview, click to set end point"),
                (Tool::Arc, 1) => Some("Move to set radius, click to set start angle"),
                (Tool::Arc, _) => Some("Move to set end angle, click to complete arc"),
                _ => None,
            },
            ToolOutcome::Committed { kind, .. } => Some(match kind {
                ShapeType::Circle => "Circle created. Click to create another circle.",
                ShapeType::Line => "Line created. Click to create another line.",
                ShapeType::Arc => "Arc created. Click to create another arc.",
                ShapeType::Text => "Text added. Click to add more text.",
                ShapeType::Image => "Image added.",
            }),
            ToolOutcome::Degenerate { kind } => Some(match kind {
                ShapeType::Line => "Line needs two distinct points. Click somewhere else.",
                _ => "Radius must be greater than zero. Click somewhere else.",
            }),
            ToolOutcome::Erased { .. } => Some("Object erased. Click on objects to erase them."),
            ToolOutcome::EraseRefused => Some("Can't erase the Smith chart"),
        }
    }
}

/// Current tool plus the state of the shape under construction.
#[derive(Debug, Clone)]
pub struct ToolStateMachine {
    tool: Tool,
    state: InProgress,
    gesture: Option<SelectGesture>,
    allow_degenerate: bool,
    hit_tolerance: f64,
}

impl ToolStateMachine {
    pub fn new(allow_degenerate: bool, hit_tolerance: f64) -> Self {
        Self {
            tool: Tool::Select,
            state: InProgress::Idle,
            gesture: None,
            allow_degenerate,
            hit_tolerance,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> &InProgress {
        &self.state
    }

    pub fn step(&self) -> u8 {
        self.state.step()
    }

    pub fn gesture(&self) -> Option<&SelectGesture> {
        self.gesture.as_ref()
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance
    }

    /// Switch tools: discard any construction, clear the selection and make
    /// user shapes interactive only for the selection tool.
    pub fn set_tool(&mut self, tool: Tool, canvas: &mut Canvas) -> &'static str {
        self.reset(canvas);
        self.tool = tool;
        canvas.set_interactive(tool == Tool::Select);
        canvas.deselect_all();
        tracing::debug!("Tool changed to {}", tool);
        tool.hint()
    }

    /// Back to step 0, removing preview and guide objects.
    pub fn reset(&mut self, canvas: &mut Canvas) {
        for id in self.state.temporary_ids() {
            canvas.remove_shape(id);
        }
        self.state = InProgress::Idle;
        self.gesture = None;
    }

    pub fn pointer_down(
        &mut self,
        canvas: &mut Canvas,
        style: &StyleSettings,
        prompt: &mut dyn UserPrompt,
        p: Point,
        additive: bool,
    ) -> ToolOutcome {
        let factory = ShapeFactory::new(style);
        match self.tool {
            Tool::Select => self.select_down(canvas, p, additive),
            Tool::Circle => self.circle_click(canvas, &factory, p),
            Tool::Line => self.line_click(canvas, &factory, p),
            Tool::Arc => self.arc_click(canvas, &factory, p),
            Tool::Eraser => self.erase_at(canvas, p),
            Tool::Text => Self::text_click(canvas, &factory, prompt, p),
        }
    }

    /// Update the preview; returns `true` if anything on the canvas changed.
    pub fn pointer_move(&mut self, canvas: &mut Canvas, style: &StyleSettings, p: Point) -> bool {
        if self.tool == Tool::Select {
            return self.select_move(canvas, p);
        }
        match &mut self.state {
            InProgress::Idle => false,
            InProgress::Circle { center, preview } => {
                let radius = center.distance_to(&p);
                canvas.set_shape(*preview, Shape::Circle(DesignCircle::new(*center, radius)))
            }
            InProgress::Line { start, preview } => {
                canvas.set_shape(*preview, Shape::Line(DesignLine::new(*start, p)))
            }
            InProgress::ArcRadius { center, guide } => {
                canvas.set_shape(*guide, Shape::Line(DesignLine::new(*center, p)))
            }
            InProgress::ArcSweep {
                center,
                radius,
                start_angle,
                current_angle,
                end_guide,
                candidate,
                ..
            } => {
                *current_angle = center.angle_to(&p);
                let end = center.polar(*radius, *current_angle);
                canvas.set_shape(*end_guide, Shape::Line(DesignLine::new(*center, end)));

                if let Some(old) = candidate.take() {
                    canvas.remove_shape(old);
                }
                let spec = ShapeFactory::new(style).arc(*center, *radius, *start_angle, *current_angle);
                *candidate = Some(spec.add_to(canvas));
                true
            }
        }
    }

    pub fn pointer_up(&mut self, canvas: &mut Canvas, p: Point) -> ToolOutcome {
        match self.gesture.take() {
            Some(SelectGesture::Band {
                origin, additive, ..
            }) => {
                let (w, h) = (p.x - origin.x, p.y - origin.y);
                if w.abs() > f64::EPSILON || h.abs() > f64::EPSILON {
                    canvas.select_in_rect(origin.x, origin.y, w, h, additive);
                }
                ToolOutcome::Selection {
                    count: canvas.selected_count(),
                }
            }
            Some(SelectGesture::Move { .. }) => ToolOutcome::Selection {
                count: canvas.selected_count(),
            },
            None => ToolOutcome::Ignored,
        }
    }

    fn select_down(&mut self, canvas: &mut Canvas, p: Point, additive: bool) -> ToolOutcome {
        if !additive && canvas.is_point_in_selection(&p, self.hit_tolerance) {
            self.gesture = Some(SelectGesture::Move { last: p });
            return ToolOutcome::Selection {
                count: canvas.selected_count(),
            };
        }

        let hit = canvas.select_at(&p, self.hit_tolerance, additive);
        self.gesture = Some(match hit {
            Some(_) => SelectGesture::Move { last: p },
            None => SelectGesture::Band {
                origin: p,
                current: p,
                additive,
            },
        });
        ToolOutcome::Selection {
            count: canvas.selected_count(),
        }
    }

    fn select_move(&mut self, canvas: &mut Canvas, p: Point) -> bool {
        match &mut self.gesture {
            Some(SelectGesture::Move { last }) => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                canvas.move_selected(dx, dy);
                true
            }
            Some(SelectGesture::Band { current, .. }) => {
                *current = p;
                false
            }
            None => false,
        }
    }

    fn circle_click(&mut self, canvas: &mut Canvas, factory: &ShapeFactory, p: Point) -> ToolOutcome {
        match self.state {
            InProgress::Circle { center, preview } => {
                let circle = DesignCircle::new(center, center.distance_to(&p));
                if circle.is_degenerate() && !self.allow_degenerate {
                    return ToolOutcome::Degenerate {
                        kind: ShapeType::Circle,
                    };
                }
                canvas.set_shape(preview, Shape::Circle(circle));
                self.state = InProgress::Idle;
                tracing::info!("Circle #{} committed", preview);
                ToolOutcome::Committed {
                    id: preview,
                    kind: ShapeType::Circle,
                }
            }
            _ => {
                let preview = factory.circle(p, 0.0).add_to(canvas);
                self.state = InProgress::Circle { center: p, preview };
                ToolOutcome::Advanced {
                    tool: Tool::Circle,
                    step: 1,
                }
            }
        }
    }

    fn line_click(&mut self, canvas: &mut Canvas, factory: &ShapeFactory, p: Point) -> ToolOutcome {
        match self.state {
            InProgress::Line { start, preview } => {
                let line = DesignLine::new(start, p);
                if line.is_degenerate() && !self.allow_degenerate {
                    return ToolOutcome::Degenerate {
                        kind: ShapeType::Line,
                    };
                }
                canvas.set_shape(preview, Shape::Line(line));
                self.state = InProgress::Idle;
                tracing::info!("Line #{} committed", preview);
                ToolOutcome::Committed {
                    id: preview,
                    kind: ShapeType::Line,
                }
            }
            _ => {
                let preview = factory.line(p, p).add_to(canvas);
                self.state = InProgress::Line { start: p, preview };
                ToolOutcome::Advanced {
                    tool: Tool::Line,
                    step: 1,
                }
            }
        }
    }

    fn arc_click(&mut self, canvas: &mut Canvas, factory: &ShapeFactory, p: Point) -> ToolOutcome {
        match self.state {
            InProgress::Idle | InProgress::Circle { .. } | InProgress::Line { .. } => {
                let guide = factory.guide(p, p).add_to(canvas);
                self.state = InProgress::ArcRadius { center: p, guide };
                ToolOutcome::Advanced {
                    tool: Tool::Arc,
                    step: 1,
                }
            }
            InProgress::ArcRadius { center, guide } => {
                let radius = center.distance_to(&p);
                if radius <= f64::EPSILON && !self.allow_degenerate {
                    return ToolOutcome::Degenerate {
                        kind: ShapeType::Arc,
                    };
                }
                let start_angle = center.angle_to(&p);
                canvas.remove_shape(guide);
                let start_guide = factory.guide(center, p).add_to(canvas);
                let end_guide = factory.guide(center, p).add_to(canvas);
                self.state = InProgress::ArcSweep {
                    center,
                    radius,
                    start_angle,
                    current_angle: start_angle,
                    start_guide,
                    end_guide,
                    candidate: None,
                };
                ToolOutcome::Advanced {
                    tool: Tool::Arc,
                    step: 2,
                }
            }
            InProgress::ArcSweep {
                center,
                radius,
                start_angle,
                ..
            } => {
                let end_angle = center.angle_to(&p);
                for id in self.state.temporary_ids() {
                    canvas.remove_shape(id);
                }
                let id = factory.arc(center, radius, start_angle, end_angle).add_to(canvas);
                self.state = InProgress::Idle;
                if let Some(arc) = canvas.get_shape(id).and_then(|o| o.shape.as_arc()) {
                    tracing::info!("Arc #{} committed: {}", id, arc.path_data());
                }
                ToolOutcome::Committed {
                    id,
                    kind: ShapeType::Arc,
                }
            }
        }
    }

    fn erase_at(&mut self, canvas: &mut Canvas, p: Point) -> ToolOutcome {
        let Some(id) = canvas.hit_test(&p, self.hit_tolerance) else {
            return ToolOutcome::Ignored;
        };
        match canvas.remove_user_shape(id) {
            Some(obj) => {
                tracing::info!("Erased {} #{}", obj.name, id);
                ToolOutcome::Erased { id }
            }
            None => ToolOutcome::EraseRefused,
        }
    }

    fn text_click(
        canvas: &mut Canvas,
        factory: &ShapeFactory,
        prompt: &mut dyn UserPrompt,
        p: Point,
    ) -> ToolOutcome {
        match prompt.prompt_text(TEXT_PROMPT) {
            Some(text) if !text.is_empty() => {
                let id = factory.text(p, &text).add_to(canvas);
                ToolOutcome::Committed {
                    id,
                    kind: ShapeType::Text,
                }
            }
            _ => ToolOutcome::Ignored,
        }
    }
}

impl Default for ToolStateMachine {
    fn default() -> Self {
        Self::new(true, 4.0)
    }
}
