use std::sync::Arc;

use image::RgbaImage;
use lyon::path::Path;

use super::{DesignerShape, Point};

/// A bitmap placed on the canvas, centered on `center` and uniformly scaled.
#[derive(Debug, Clone)]
pub struct DesignImage {
    pub bitmap: Arc<RgbaImage>,
    pub center: Point,
    pub scale: f64,
}

impl DesignImage {
    pub fn new(bitmap: Arc<RgbaImage>, center: Point, scale: f64) -> Self {
        Self {
            bitmap,
            center,
            scale,
        }
    }

    /// Displayed size in canvas pixels.
    pub fn size(&self) -> (f64, f64) {
        (
            self.bitmap.width() as f64 * self.scale,
            self.bitmap.height() as f64 * self.scale,
        )
    }

    pub fn top_left(&self) -> Point {
        let (w, h) = self.size();
        Point::new(self.center.x - w / 2.0, self.center.y - h / 2.0)
    }
}

impl PartialEq for DesignImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bitmap, &other.bitmap)
            && self.center == other.center
            && self.scale == other.scale
    }
}

impl DesignerShape for DesignImage {
    fn render(&self) -> Path {
        let (x1, y1, x2, y2) = self.bounds();
        let mut builder = Path::builder();
        builder.add_rectangle(
            &lyon::math::Box2D::new(
                lyon::math::point(x1 as f32, y1 as f32),
                lyon::math::point(x2 as f32, y2 as f32),
            ),
            lyon::path::Winding::Positive,
        );
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        let (w, h) = self.size();
        let tl = self.top_left();
        (tl.x, tl.y, tl.x + w, tl.y + h)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.offset(dx, dy);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let (x1, y1, x2, y2) = self.bounds();
        p.x >= x1 - tolerance && p.x <= x2 + tolerance && p.y >= y1 - tolerance && p.y <= y2 + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_bounds_are_centered() {
        let bitmap = Arc::new(RgbaImage::new(100, 50));
        let img = DesignImage::new(bitmap, Point::new(200.0, 100.0), 2.0);
        assert_eq!(img.size(), (200.0, 100.0));
        assert_eq!(img.bounds(), (100.0, 50.0, 300.0, 150.0));
        assert!(img.contains_point(Point::new(120.0, 60.0), 0.0));
    }
}
