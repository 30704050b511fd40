use lyon::path::Path;
use serde::{Deserialize, Serialize};

mod arc;
mod circle;
mod image;
mod line;
mod text;

pub use arc::{normalize_angle, ArcFlags, DesignArc};
pub use circle::DesignCircle;
pub use image::DesignImage;
pub use line::DesignLine;
pub use text::{DesignText, TextAnchor};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of `other` seen from this point, in radians, screen orientation.
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point at `radius` from this point along `angle` (radians).
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }

    /// This point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

pub trait DesignerShape {
    /// Outline in canvas coordinates.
    fn render(&self) -> Path;
    fn bounds(&self) -> (f64, f64, f64, f64);
    fn contains_point(&self, p: Point, tolerance: f64) -> bool;

    fn translate(&mut self, dx: f64, dy: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    Circle,
    Line,
    Arc,
    Text,
    Image,
}

impl ShapeType {
    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Circle => "Circle",
            ShapeType::Line => "Line",
            ShapeType::Arc => "Arc",
            ShapeType::Text => "Text",
            ShapeType::Image => "Image",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(DesignCircle),
    Line(DesignLine),
    Arc(DesignArc),
    Text(DesignText),
    Image(DesignImage),
}

impl DesignerShape for Shape {
    fn render(&self) -> Path {
        match self {
            Shape::Circle(s) => s.render(),
            Shape::Line(s) => s.render(),
            Shape::Arc(s) => s.render(),
            Shape::Text(s) => s.render(),
            Shape::Image(s) => s.render(),
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Arc(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Circle(s) => s.translate(dx, dy),
            Shape::Line(s) => s.translate(dx, dy),
            Shape::Arc(s) => s.translate(dx, dy),
            Shape::Text(s) => s.translate(dx, dy),
            Shape::Image(s) => s.translate(dx, dy),
        }
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            Shape::Circle(s) => s.contains_point(p, tolerance),
            Shape::Line(s) => s.contains_point(p, tolerance),
            Shape::Arc(s) => s.contains_point(p, tolerance),
            Shape::Text(s) => s.contains_point(p, tolerance),
            Shape::Image(s) => s.contains_point(p, tolerance),
        }
    }
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Line(_) => ShapeType::Line,
            Shape::Arc(_) => ShapeType::Arc,
            Shape::Text(_) => ShapeType::Text,
            Shape::Image(_) => ShapeType::Image,
        }
    }

    pub fn as_circle(&self) -> Option<&DesignCircle> {
        match self {
            Shape::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&DesignLine> {
        match self {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_arc(&self) -> Option<&DesignArc> {
        match self {
            Shape::Arc(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&DesignText> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Shape::Image(_))
    }
}

/// Bounding box of a set of points as `(min_x, min_y, max_x, max_y)`.
pub(crate) fn points_bounds(points: impl IntoIterator<Item = Point>) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Outline of an axis-aligned box rotated by `rotation_deg` about `pivot`.
pub(crate) fn box_outline(
    bounds: (f64, f64, f64, f64),
    rotation_deg: f64,
    pivot: Point,
) -> [Point; 4] {
    let (x1, y1, x2, y2) = bounds;
    let corners = [
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x2, y2),
        Point::new(x1, y2),
    ];
    if rotation_deg.abs() < 1e-9 {
        return corners;
    }
    corners.map(|c| rotate_point(c, pivot, rotation_deg))
}

pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let angle_rad = angle_deg.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * c - dy * s,
        y: center.y + dx * s + dy * c,
    }
}
