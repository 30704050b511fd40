use smithkit_core::{LineStyle, PaperSize, Rgb, StrokeWidth};
use smithkit_settings::{Config, ReloadPolicy, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.style.stroke_width = StrokeWidth::new(5).unwrap();
    config.style.stroke_color = Rgb::new(0x12, 0x34, 0x56);
    config.style.line_style = LineStyle::Dotted;
    config.export.paper = PaperSize::Letter;
    config.chart.image = Some("images/Smith_chart.png".into());

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded.style.stroke_width.get(), 5);
    assert_eq!(loaded.style.stroke_color, Rgb::new(0x12, 0x34, 0x56));
    assert_eq!(loaded.style.line_style, LineStyle::Dotted);
    assert_eq!(loaded.export.paper, PaperSize::Letter);
    assert_eq!(
        loaded.chart.image.as_deref(),
        Some(std::path::Path::new("images/Smith_chart.png"))
    );
}

#[test]
fn test_json_file_uses_user_facing_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    Config::default().save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"#000000\""));
    assert!(text.contains("\"debounce\""));
    assert!(text.contains("smith-chart-drawing.png"));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.resize.policy, ReloadPolicy::Debounce);
    assert_eq!(loaded.export.pdf_multiplier, 1.5);
}

#[test]
fn test_invalid_values_fail_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "[export]\npng_multiplier = -1.0\n").unwrap();
    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));

    std::fs::write(&path, "[style]\nstroke_width = 0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));

    std::fs::write(&path, "[style]\nstroke_color = \"red\"\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}

#[test]
fn test_unsupported_extension_is_rejected_on_save() {
    let dir = TempDir::new().unwrap();
    let err = Config::default()
        .save_to_file(&dir.path().join("config.ini"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}
