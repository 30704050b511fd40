use lyon::path::Path;

use super::{DesignerShape, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct DesignLine {
    pub start: Point,
    pub end: Point,
}

impl DesignLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() <= f64::EPSILON
    }
}

impl DesignerShape for DesignLine {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.begin(self.start.to_lyon());
        builder.line_to(self.end.to_lyon());
        builder.end(false);
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.offset(dx, dy);
        self.end = self.end.offset(dx, dy);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let l2 = (self.end.x - self.start.x).powi(2) + (self.end.y - self.start.y).powi(2);
        if l2 == 0.0 {
            return p.distance_to(&self.start) <= tolerance;
        }
        let t = ((p.x - self.start.x) * (self.end.x - self.start.x)
            + (p.y - self.start.y) * (self.end.y - self.start.y))
            / l2;
        let t = t.clamp(0.0, 1.0);
        let proj = Point::new(
            self.start.x + t * (self.end.x - self.start.x),
            self.start.y + t * (self.end.y - self.start.y),
        );
        p.distance_to(&proj) <= tolerance
    }
}
