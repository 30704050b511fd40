use std::sync::Arc;

use image::RgbaImage;
use smithkit_designer::{
    chart_primitives, Canvas, Point, ResistanceCircle, Shape, SmithChart, CHART_VALUES,
};
use smithkit_settings::ChartSettings;

#[test]
fn test_chart_radius_from_smaller_dimension() {
    let chart = SmithChart::with_bitmap(&ChartSettings::default(), None);
    assert_eq!(chart.radius_for(1200.0, 800.0), 360.0);
    assert_eq!(chart.radius_for(500.0, 900.0), 225.0);
}

#[test]
fn test_resistance_circle_geometry() {
    let c = ResistanceCircle::new(Point::new(0.0, 0.0), 100.0, 0.5);
    assert!((c.radius - 100.0 / 1.5).abs() < 1e-9);
    assert!((c.center.x - 100.0 / 3.0).abs() < 1e-9);
    assert!(c.dashed());
}

#[test]
fn test_labels_cover_every_value() {
    let prims = chart_primitives(Point::new(600.0, 400.0), 360.0);
    let labels: Vec<String> = prims
        .iter()
        .filter_map(|(shape, _)| shape.as_text().map(|t| t.text.clone()))
        .collect();
    for value in CHART_VALUES {
        assert!(labels.contains(&value.to_string()));
        assert!(labels.contains(&format!("j{value}")));
        assert!(labels.contains(&format!("-j{value}")));
    }
    assert!(labels.contains(&"SMITH CHART".to_string()));
    assert!(labels.contains(&"1.0 + j0.0".to_string()));
}

#[test]
fn test_resize_regeneration_follows_canvas() {
    let mut canvas = Canvas::with_size(1200.0, 800.0);
    let mut chart = SmithChart::with_bitmap(&ChartSettings::default(), None);
    chart.regenerate(&mut canvas);
    let before = chart.primitive_ids().len();

    canvas.set_size(600.0, 600.0);
    chart.regenerate(&mut canvas);
    assert_eq!(chart.primitive_ids().len(), before);
    assert_eq!(canvas.shape_count(), before);

    let outer = canvas
        .get_shape(chart.primitive_ids()[0])
        .and_then(|o| o.shape.as_circle().cloned())
        .unwrap();
    assert_eq!(outer.center, Point::new(300.0, 300.0));
    assert_eq!(outer.radius, 270.0);
}

#[test]
fn test_bitmap_only_chart_when_grid_disabled() {
    let settings = ChartSettings {
        draw_grid: false,
        ..ChartSettings::default()
    };
    let mut canvas = Canvas::with_size(1000.0, 500.0);
    let mut chart = SmithChart::with_bitmap(&settings, Some(Arc::new(RgbaImage::new(200, 100))));
    chart.regenerate(&mut canvas);

    assert!(chart.primitive_ids().is_empty());
    assert_eq!(canvas.shape_count(), 1);
    let obj = canvas.shapes().next().unwrap();
    let Shape::Image(img) = &obj.shape else {
        panic!("expected the chart bitmap");
    };
    assert_eq!(img.size(), (900.0, 450.0));
    assert_eq!(img.center, Point::new(500.0, 250.0));
    assert!(obj.permanent);
}

#[test]
fn test_stray_bitmaps_are_replaced() {
    let mut canvas = Canvas::with_size(400.0, 400.0);
    let bitmap = Arc::new(RgbaImage::new(10, 10));
    let mut first = SmithChart::with_bitmap(&ChartSettings::default(), Some(bitmap.clone()));
    first.regenerate(&mut canvas);

    // A second chart on the same canvas must not leave two backgrounds.
    let mut second = SmithChart::with_bitmap(&ChartSettings::default(), Some(bitmap));
    second.regenerate(&mut canvas);

    let images = canvas.shapes().filter(|o| o.shape.is_image()).count();
    assert_eq!(images, 1);
}
