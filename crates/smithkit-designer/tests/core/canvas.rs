use smithkit_core::{Rgb, StrokeWidth};
use smithkit_designer::{
    Canvas, DesignCircle, DesignLine, DesignText, Point, Shape, ShapeStyle,
};

fn style() -> ShapeStyle {
    ShapeStyle::stroked(StrokeWidth::default(), Rgb::BLACK)
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let mut canvas = Canvas::default();
    let a = canvas.add(Shape::Circle(DesignCircle::new(Point::new(0.0, 0.0), 1.0)), style());
    let b = canvas.add(Shape::Circle(DesignCircle::new(Point::new(0.0, 0.0), 1.0)), style());
    canvas.remove_shape(a);
    let c = canvas.add(Shape::Circle(DesignCircle::new(Point::new(0.0, 0.0), 1.0)), style());
    assert!(a < b && b < c);
}

#[test]
fn test_shift_click_toggles_selection() {
    let mut canvas = Canvas::default();
    let left = canvas.add(
        Shape::Line(DesignLine::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        style(),
    );
    let right = canvas.add(
        Shape::Line(DesignLine::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0))),
        style(),
    );
    canvas.set_interactive(true);

    canvas.select_at(&Point::new(50.0, 0.0), 2.0, false);
    canvas.select_at(&Point::new(50.0, 50.0), 2.0, true);
    assert_eq!(canvas.selected_ids(), vec![left, right]);

    canvas.select_at(&Point::new(50.0, 0.0), 2.0, true);
    assert_eq!(canvas.selected_ids(), vec![right]);

    canvas.select_at(&Point::new(500.0, 500.0), 2.0, false);
    assert_eq!(canvas.selected_count(), 0);
}

#[test]
fn test_removing_selected_shape_updates_primary() {
    let mut canvas = Canvas::default();
    let a = canvas.add(Shape::Circle(DesignCircle::new(Point::new(10.0, 10.0), 5.0)), style());
    let b = canvas.add(Shape::Circle(DesignCircle::new(Point::new(50.0, 10.0), 5.0)), style());
    canvas.set_interactive(true);
    canvas.select_shape(a, false);
    canvas.select_shape(b, true);
    assert_eq!(canvas.selected_id(), Some(b));

    canvas.remove_shape(b);
    assert_eq!(canvas.selected_id(), Some(a));
}

#[test]
fn test_rotated_text_hit_test() {
    let mut canvas = Canvas::default();
    let text = DesignText::new("j0.5", Point::new(100.0, 100.0), 12.0).rotated(90.0);
    let id = canvas.add(Shape::Text(text), style().with_fill(Rgb::BLACK));

    // Rotated a quarter turn clockwise, the text runs downward from its anchor.
    assert_eq!(canvas.hit_test(&Point::new(95.0, 110.0), 0.0), Some(id));
    assert_eq!(canvas.hit_test(&Point::new(110.0, 95.0), 0.0), None);
}
