//! End-to-end drawing session scenarios

use std::f64::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use smithkit_core::Rgb;
use smithkit_designer::{
    DrawingSession, Key, Modifiers, ScriptedPrompt, StyleUpdate, Tool, ToolOutcome,
    CLEAR_CONFIRMATION, PDF_FAILURE_MESSAGE,
};
use smithkit_settings::{Config, ReloadPolicy};

fn session() -> DrawingSession<ScriptedPrompt> {
    DrawingSession::new(Config::default(), ScriptedPrompt::accepting())
}

fn user_shape_count(s: &DrawingSession<ScriptedPrompt>) -> usize {
    s.canvas().shapes().filter(|o| !o.permanent).count()
}

#[test]
fn test_circle_two_clicks_radius_fifty() {
    let mut s = session();
    s.set_tool(Tool::Circle);
    s.pointer_down(100.0, 100.0);
    assert_eq!(s.status(), "Move to preview, click to set radius");
    s.pointer_move(120.0, 100.0);
    let outcome = s.pointer_down(150.0, 100.0);

    let ToolOutcome::Committed { id, .. } = outcome else {
        panic!("circle not committed: {outcome:?}");
    };
    let circle = s.canvas().get_shape(id).unwrap().shape.as_circle().unwrap().clone();
    assert_eq!(circle.radius, 50.0);
    assert_eq!(s.status(), "Circle created. Click to create another circle.");
    assert_eq!(user_shape_count(&s), 1);
}

#[test]
fn test_arc_quarter_turn_path() {
    let mut s = session();
    s.set_tool(Tool::Arc);
    s.pointer_down(200.0, 200.0);
    s.pointer_move(250.0, 200.0);
    s.pointer_down(250.0, 200.0);
    assert_eq!(s.status(), "Move to set end angle, click to complete arc");
    s.pointer_move(200.0, 150.0);
    let outcome = s.pointer_down(200.0, 150.0);

    let ToolOutcome::Committed { id, .. } = outcome else {
        panic!("arc not committed: {outcome:?}");
    };
    let arc = s.canvas().get_shape(id).unwrap().shape.as_arc().unwrap().clone();
    assert_eq!(arc.start_angle, 0.0);
    assert!((arc.end_angle() + FRAC_PI_2).abs() < 1e-12);
    assert_eq!(arc.path_data(), "M 250 200 A 50 50 0 0 0 200 150");
    assert_eq!(user_shape_count(&s), 1);
}

#[test]
fn test_recolour_two_selected_shapes() {
    let red = Rgb::new(255, 0, 0);
    let mut s = session();
    s.set_tool(Tool::Line);
    s.pointer_down(10.0, 10.0);
    s.pointer_down(60.0, 10.0);
    s.pointer_down(10.0, 700.0);
    s.pointer_down(60.0, 700.0);

    s.set_tool(Tool::Text);
    s.prompt_mut().push_text("Z0");
    s.pointer_down(30.0, 60.0);

    s.set_tool(Tool::Select);
    s.pointer_down(30.0, 10.0);
    s.pointer_up(30.0, 10.0);
    s.pointer_down_with(30.0, 60.0, Modifiers { shift: true });
    s.pointer_up(30.0, 60.0);
    assert_eq!(s.canvas().selected_count(), 2);

    let touched = s.update_settings(StyleUpdate::stroke_color(red));
    assert_eq!(touched, 2);
    assert_eq!(s.style().stroke_color, red);

    let strokes: Vec<bool> = s
        .canvas()
        .shapes()
        .filter(|o| !o.permanent)
        .map(|o| o.style.stroke == red)
        .collect();
    assert_eq!(strokes, vec![true, false, true]);

    let text = s
        .canvas()
        .shapes()
        .find(|o| o.shape.as_text().is_some_and(|t| t.text == "Z0"))
        .unwrap();
    assert_eq!(text.style.fill, Some(red));
    assert!(s
        .canvas()
        .shapes()
        .filter(|o| o.permanent)
        .all(|o| o.style.stroke != red && o.style.fill != Some(red)));
}

#[test]
fn test_style_change_outside_select_only_affects_future_shapes() {
    let mut s = session();
    s.set_tool(Tool::Line);
    s.pointer_down(10.0, 10.0);
    s.pointer_down(60.0, 10.0);

    assert_eq!(s.update_settings(StyleUpdate::stroke_color(Rgb::new(0, 255, 0))), 0);
    s.pointer_down(10.0, 40.0);
    s.pointer_down(60.0, 40.0);

    let colours: Vec<Rgb> = s
        .canvas()
        .shapes()
        .filter(|o| !o.permanent)
        .map(|o| o.style.stroke)
        .collect();
    assert_eq!(colours, vec![Rgb::BLACK, Rgb::new(0, 255, 0)]);
}

#[test]
fn test_clear_all_keeps_only_chart() {
    let mut s = session();
    let chart_before = s.chart_ids();

    s.set_tool(Tool::Circle);
    s.pointer_down(100.0, 100.0);
    s.pointer_down(120.0, 100.0);
    s.set_tool(Tool::Line);
    s.pointer_down(0.0, 0.0);
    s.pointer_down(50.0, 50.0);
    // leave a line preview in progress
    s.pointer_down(300.0, 300.0);

    assert!(s.clear_all());
    assert_eq!(s.prompt().prompts.last().map(String::as_str), Some(CLEAR_CONFIRMATION));
    assert_eq!(user_shape_count(&s), 0);
    assert_eq!(s.chart_ids(), chart_before);
    assert_eq!(s.canvas().shape_count(), chart_before.len());
    assert_eq!(s.tools().step(), 0);
}

#[test]
fn test_delete_removes_selection_only() {
    let mut s = session();
    s.set_tool(Tool::Line);
    s.pointer_down(10.0, 10.0);
    s.pointer_down(60.0, 10.0);
    s.pointer_down(10.0, 40.0);
    s.pointer_down(60.0, 40.0);

    s.set_tool(Tool::Select);
    s.pointer_down(30.0, 10.0);
    s.pointer_up(30.0, 10.0);

    assert_eq!(s.key_down(&Key::Backspace), 1);
    assert_eq!(s.status(), "Deleted 1 object(s)");
    assert_eq!(user_shape_count(&s), 1);
    assert_eq!(s.key_down(&Key::Delete), 0);
    assert_eq!(s.key_down(&Key::Other("a".into())), 0);
}

#[test]
fn test_chart_cannot_be_selected_or_erased() {
    let mut s = session();
    let center = s.canvas().center();
    let before = s.canvas().shape_count();

    s.pointer_down(center.x, center.y);
    s.pointer_up(center.x, center.y);
    assert_eq!(s.canvas().selected_count(), 0);
    assert_eq!(s.key_down(&Key::Delete), 0);

    s.set_tool(Tool::Eraser);
    s.pointer_down(center.x, center.y);
    assert_eq!(s.status(), "Can't erase the Smith chart");
    assert_eq!(s.canvas().shape_count(), before);
}

#[test]
fn test_rubber_band_then_drag() {
    let mut s = session();
    s.set_tool(Tool::Line);
    s.pointer_down(10.0, 10.0);
    s.pointer_down(40.0, 10.0);
    s.pointer_down(10.0, 30.0);
    s.pointer_down(40.0, 30.0);

    s.set_tool(Tool::Select);
    s.pointer_down(0.0, 0.0);
    s.pointer_move(50.0, 50.0);
    assert_eq!(s.pointer_up(50.0, 50.0), ToolOutcome::Selection { count: 2 });

    s.pointer_down(25.0, 10.0);
    assert!(s.pointer_move(35.0, 20.0));
    s.pointer_up(35.0, 20.0);

    let starts: Vec<(f64, f64)> = s
        .canvas()
        .shapes()
        .filter(|o| !o.permanent)
        .filter_map(|o| o.shape.as_line())
        .map(|l| (l.start.x, l.start.y))
        .collect();
    assert_eq!(starts, vec![(20.0, 20.0), (20.0, 40.0)]);
}

#[test]
fn test_repeated_drags_do_not_drift() {
    let mut s = session();
    s.set_tool(Tool::Arc);
    s.pointer_down(1000.123, 700.456);
    s.pointer_down(1050.123, 700.456);
    let outcome = s.pointer_down(1000.123, 650.456);
    let ToolOutcome::Committed { id, .. } = outcome else {
        panic!("arc not committed: {outcome:?}");
    };

    s.set_tool(Tool::Select);
    s.pointer_down(1050.123, 700.456);
    for i in 0..200 {
        if i % 2 == 0 {
            s.pointer_move(1057.4, 697.35);
        } else {
            s.pointer_move(1050.123, 700.456);
        }
    }
    s.pointer_up(1050.123, 700.456);

    let arc = s.canvas().get_shape(id).unwrap().shape.as_arc().unwrap().clone();
    assert!((arc.center.x - 1000.123).abs() < 1e-9);
    assert!((arc.center.y - 700.456).abs() < 1e-9);
    assert!((arc.radius - 50.0).abs() < 1e-9);
}

#[test]
fn test_debounced_resize_reloads_once() {
    let mut s = session();
    let t0 = Instant::now();
    s.resize(900.0, 700.0, t0);
    s.resize(1000.0, 700.0, t0 + Duration::from_millis(50));
    assert_eq!(s.pending_reloads(), 1);

    assert_eq!(s.tick(t0 + Duration::from_millis(100)), 0);
    assert_eq!(s.tick(t0 + Duration::from_millis(260)), 1);

    let outer = s
        .canvas()
        .get_shape(s.chart().primitive_ids()[0])
        .and_then(|o| o.shape.as_circle().cloned())
        .unwrap();
    assert_eq!(outer.center.x, 500.0);
    assert_eq!(outer.radius, 315.0);
}

#[test]
fn test_fixed_delay_resize_runs_every_reload() {
    let mut config = Config::default();
    config.resize.policy = ReloadPolicy::FixedDelay;
    let mut s = DrawingSession::new(config, ScriptedPrompt::accepting());
    let count = s.canvas().shape_count();

    let t0 = Instant::now();
    s.resize(900.0, 700.0, t0);
    s.resize(1000.0, 700.0, t0 + Duration::from_millis(50));
    assert_eq!(s.tick(t0 + Duration::from_secs(1)), 2);
    assert_eq!(s.canvas().shape_count(), count);
}

#[test]
fn test_pdf_failure_alerts_and_keeps_canvas() {
    let mut s = session();
    s.set_tool(Tool::Line);
    s.pointer_down(10.0, 10.0);
    s.pointer_down(60.0, 10.0);
    let before = s.canvas().shape_count();

    s.canvas_mut().set_size(0.0, 0.0);
    assert!(s.export_pdf().is_none());
    assert_eq!(s.prompt().alerts, vec![PDF_FAILURE_MESSAGE.to_string()]);
    assert_eq!(s.canvas().shape_count(), before);
    assert!(s.export_png().is_err());
}
