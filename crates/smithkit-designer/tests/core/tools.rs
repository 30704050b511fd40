use std::f64::consts::FRAC_PI_2;

use smithkit_core::{LineStyle, Rgb, StrokeWidth};
use smithkit_designer::{
    Canvas, InProgress, Point, ScriptedPrompt, ShapeType, StyleSettings, Tool, ToolOutcome,
    ToolStateMachine,
};

struct Bench {
    machine: ToolStateMachine,
    canvas: Canvas,
    style: StyleSettings,
    prompt: ScriptedPrompt,
}

impl Bench {
    fn new(tool: Tool) -> Self {
        let mut machine = ToolStateMachine::new(true, 4.0);
        let mut canvas = Canvas::default();
        machine.set_tool(tool, &mut canvas);
        Self {
            machine,
            canvas,
            style: StyleSettings::default(),
            prompt: ScriptedPrompt::new(),
        }
    }

    fn click(&mut self, x: f64, y: f64) -> ToolOutcome {
        self.machine.pointer_down(
            &mut self.canvas,
            &self.style,
            &mut self.prompt,
            Point::new(x, y),
            false,
        )
    }

    fn hover(&mut self, x: f64, y: f64) -> bool {
        self.machine
            .pointer_move(&mut self.canvas, &self.style, Point::new(x, y))
    }

    fn committed_id(outcome: ToolOutcome) -> u64 {
        match outcome {
            ToolOutcome::Committed { id, .. } => id,
            other => panic!("expected a committed shape, got {other:?}"),
        }
    }
}

#[test]
fn test_circle_preview_matches_commit() {
    let mut b = Bench::new(Tool::Circle);
    b.click(100.0, 100.0);
    let preview = match b.machine.state() {
        InProgress::Circle { preview, .. } => *preview,
        other => panic!("unexpected state {other:?}"),
    };

    assert!(b.hover(130.0, 140.0));
    let radius = b.canvas.get_shape(preview).unwrap().shape.as_circle().unwrap().radius;
    assert_eq!(radius, 50.0);

    let id = Bench::committed_id(b.click(130.0, 140.0));
    assert_eq!(id, preview);
    assert_eq!(b.canvas.get_shape(id).unwrap().shape.as_circle().unwrap().radius, 50.0);
}

#[test]
fn test_pointer_move_while_idle_does_nothing() {
    let mut b = Bench::new(Tool::Line);
    assert!(!b.hover(10.0, 10.0));
    assert_eq!(b.canvas.shape_count(), 0);
}

#[test]
fn test_switching_tools_discards_previews() {
    for tool in [Tool::Circle, Tool::Line, Tool::Arc] {
        let mut b = Bench::new(tool);
        b.click(100.0, 100.0);
        if tool == Tool::Arc {
            b.click(150.0, 100.0);
            b.hover(100.0, 150.0);
        }
        assert!(b.canvas.shape_count() > 0);

        b.machine.set_tool(Tool::Select, &mut b.canvas);
        assert_eq!(b.canvas.shape_count(), 0, "orphan preview left by {tool}");
        assert_eq!(b.machine.step(), 0);
    }
}

#[test]
fn test_arc_three_clicks_quarter_turn() {
    let mut b = Bench::new(Tool::Arc);
    assert_eq!(b.click(200.0, 200.0), ToolOutcome::Advanced { tool: Tool::Arc, step: 1 });
    assert_eq!(b.click(250.0, 200.0), ToolOutcome::Advanced { tool: Tool::Arc, step: 2 });
    let id = Bench::committed_id(b.click(200.0, 150.0));

    let arc = b.canvas.get_shape(id).unwrap().shape.as_arc().unwrap().clone();
    assert_eq!(arc.start_angle, 0.0);
    assert!((arc.end_angle() + FRAC_PI_2).abs() < 1e-12);
    let flags = arc.flags();
    assert!(!flags.large_arc);
    assert!(!flags.sweep);
}

#[test]
fn test_arc_candidate_uses_current_style() {
    let mut b = Bench::new(Tool::Arc);
    b.style = StyleSettings {
        stroke_width: StrokeWidth::new(5).unwrap(),
        stroke_color: Rgb::new(0, 0, 255),
        line_style: LineStyle::Dashed,
    };
    b.click(0.0, 0.0);
    b.click(10.0, 0.0);
    b.hover(0.0, 10.0);

    let candidate = match b.machine.state() {
        InProgress::ArcSweep { candidate, .. } => candidate.unwrap(),
        other => panic!("unexpected state {other:?}"),
    };
    let obj = b.canvas.get_shape(candidate).unwrap();
    assert_eq!(obj.style.stroke_width.get(), 5);
    assert_eq!(obj.style.stroke, Rgb::new(0, 0, 255));
}

#[test]
fn test_eraser_refuses_chart_and_removes_user_shapes() {
    let mut b = Bench::new(Tool::Line);
    b.click(10.0, 10.0);
    let line = Bench::committed_id(b.click(90.0, 10.0));

    let chart = b.canvas.add_permanent(
        smithkit_designer::Shape::Circle(smithkit_designer::DesignCircle::new(
            Point::new(300.0, 300.0),
            50.0,
        )),
        smithkit_designer::ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::GRID),
    );

    b.machine.set_tool(Tool::Eraser, &mut b.canvas);
    let refused = b.click(300.0, 300.0);
    assert_eq!(refused, ToolOutcome::EraseRefused);
    assert_eq!(refused.status_message(), Some("Can't erase the Smith chart"));
    assert!(b.canvas.contains(chart));

    assert_eq!(b.click(50.0, 10.0), ToolOutcome::Erased { id: line });
    assert!(!b.canvas.contains(line));
    assert_eq!(b.click(600.0, 10.0), ToolOutcome::Ignored);
}

#[test]
fn test_text_tool_places_centered_text() {
    let mut b = Bench::new(Tool::Text);
    b.prompt.push_text("Z = 50");
    let outcome = b.click(400.0, 300.0);
    assert!(matches!(outcome, ToolOutcome::Committed { kind: ShapeType::Text, .. }));
    assert_eq!(outcome.status_message(), Some("Text added. Click to add more text."));

    let text = b.canvas.shapes().next().unwrap().shape.as_text().unwrap().clone();
    assert_eq!(text.text, "Z = 50");
    assert_eq!(text.position, Point::new(400.0, 300.0));
    assert_eq!(text.font_size, 16.0);
}

#[test]
fn test_degenerate_line_rejected_when_disabled() {
    let mut machine = ToolStateMachine::new(false, 4.0);
    let mut canvas = Canvas::default();
    let style = StyleSettings::default();
    let mut prompt = ScriptedPrompt::new();
    machine.set_tool(Tool::Line, &mut canvas);

    let p = Point::new(5.0, 5.0);
    machine.pointer_down(&mut canvas, &style, &mut prompt, p, false);
    let outcome = machine.pointer_down(&mut canvas, &style, &mut prompt, p, false);
    assert_eq!(outcome, ToolOutcome::Degenerate { kind: ShapeType::Line });
    assert!(outcome.status_message().is_some());

    let done = machine.pointer_down(&mut canvas, &style, &mut prompt, Point::new(6.0, 5.0), false);
    assert!(matches!(done, ToolOutcome::Committed { kind: ShapeType::Line, .. }));
    assert_eq!(canvas.shape_count(), 1);
}
