use lyon::path::Path;

use super::{DesignerShape, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct DesignCircle {
    pub center: Point,
    pub radius: f64,
}

impl DesignCircle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius <= f64::EPSILON
    }
}

impl DesignerShape for DesignCircle {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.add_circle(
            self.center.to_lyon(),
            self.radius as f32,
            lyon::path::Winding::Positive,
        );
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.offset(dx, dy);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.center.distance_to(&p) <= self.radius + tolerance
    }
}
