//! Script runner integration tests

use smithkit::script::{parse_script, ScriptError, ScriptRunner};
use smithkit::{Config, DrawingSession, Rgb, ScriptedPrompt};
use tempfile::TempDir;

fn runner(dir: &TempDir) -> ScriptRunner {
    let mut config = Config::default();
    config.canvas.width = 400;
    config.canvas.height = 300;
    ScriptRunner::new(
        DrawingSession::new(config, ScriptedPrompt::accepting()),
        dir.path(),
    )
}

#[test]
fn test_script_draws_and_saves() {
    let dir = TempDir::new().unwrap();
    let mut runner = runner(&dir);
    let commands = parse_script(
        "# two circles, recolour one\n\
         tool circle\n\
         down 100 100\n\
         move 120 100\n\
         down 150 100\n\
         down 300 200\n\
         down 310 200\n\
         tool select\n\
         down 100 100\n\
         up 100 100\n\
         style color #ff0000\n\
         save png\n\
         save pdf\n",
    )
    .unwrap();

    runner.run(&commands).unwrap();

    let user: Vec<_> = runner
        .session()
        .canvas()
        .shapes()
        .filter(|o| !o.permanent)
        .collect();
    assert_eq!(user.len(), 2);
    assert_eq!(user[0].style.stroke, Rgb::new(255, 0, 0));
    assert_eq!(user[1].style.stroke, Rgb::BLACK);
    assert_eq!(user[0].shape.as_circle().unwrap().radius, 50.0);

    assert_eq!(runner.saved().len(), 2);
    for path in runner.saved() {
        assert!(path.exists());
    }
    let png = image::open(dir.path().join("smith-chart-drawing.png")).unwrap();
    assert_eq!((png.width(), png.height()), (800, 600));
}

#[test]
fn test_text_answers_and_declined_clear() {
    let dir = TempDir::new().unwrap();
    let mut runner = runner(&dir);
    let commands = parse_script(
        "tool text\n\
         text Z0\n\
         down 200 150\n\
         cancel\n\
         down 250 150\n\
         confirm no\n\
         clear\n",
    )
    .unwrap();
    runner.run(&commands).unwrap();

    let texts: Vec<String> = runner
        .session()
        .canvas()
        .shapes()
        .filter(|o| !o.permanent)
        .filter_map(|o| o.shape.as_text().map(|t| t.text.clone()))
        .collect();
    assert_eq!(texts, vec!["Z0".to_string()]);
}

#[test]
fn test_resize_reload_is_flushed_at_end() {
    let dir = TempDir::new().unwrap();
    let mut runner = runner(&dir);
    let commands = parse_script("resize 800 600\n").unwrap();
    runner.run(&commands).unwrap();

    let session = runner.session();
    assert_eq!(session.pending_reloads(), 0);
    let outer = session
        .canvas()
        .get_shape(session.chart().primitive_ids()[0])
        .and_then(|o| o.shape.as_circle().cloned())
        .unwrap();
    assert_eq!(outer.radius, 270.0);
}

#[test]
fn test_bad_script_reports_line() {
    let err = parse_script("tool circle\nwiggle 1 2\n").err();
    assert!(matches!(err, Some(ScriptError::Parse { line: 2, .. })));
}
