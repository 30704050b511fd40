use smithkit_designer::{Point, Viewport};

#[test]
fn test_identity_by_default() {
    let vp = Viewport::new(800.0, 600.0);
    assert_eq!(vp.pixel_to_canvas(120.0, 40.0), Point::new(120.0, 40.0));
}

#[test]
fn test_round_trip_with_zoom_and_pan() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.0);
    vp.set_pan(30.0, -10.0);
    let p = Point::new(75.0, 125.0);
    let (px, py) = vp.canvas_to_pixel(&p);
    let back = vp.pixel_to_canvas(px, py);
    assert!((back.x - p.x).abs() < 1e-9);
    assert!((back.y - p.y).abs() < 1e-9);
}

#[test]
fn test_zoom_to_point_keeps_point_fixed() {
    let mut vp = Viewport::new(800.0, 600.0);
    let anchor = Point::new(200.0, 150.0);
    let before = vp.canvas_to_pixel(&anchor);
    vp.zoom_to_point(&anchor, 3.0);
    let after = vp.canvas_to_pixel(&anchor);
    assert!((before.0 - after.0).abs() < 1e-9);
    assert!((before.1 - after.1).abs() < 1e-9);
}
