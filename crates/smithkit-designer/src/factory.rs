//! Construction of user shapes from geometry and the current style.

use crate::canvas::Canvas;
use crate::model::{DesignArc, DesignCircle, DesignLine, DesignText, Point, Shape};
use crate::style::{ShapeStyle, StyleSettings};

/// A shape paired with the style it will be added with.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub shape: Shape,
    pub style: ShapeStyle,
}

impl ShapeSpec {
    pub fn add_to(self, canvas: &mut Canvas) -> u64 {
        canvas.add(self.shape, self.style)
    }
}

/// Builds shapes styled from a snapshot of [`StyleSettings`].
#[derive(Debug, Clone, Copy)]
pub struct ShapeFactory {
    style: StyleSettings,
}

impl ShapeFactory {
    pub fn new(style: &StyleSettings) -> Self {
        Self { style: *style }
    }

    pub fn circle(&self, center: Point, radius: f64) -> ShapeSpec {
        ShapeSpec {
            shape: Shape::Circle(DesignCircle::new(center, radius)),
            style: self.style.shape_style(),
        }
    }

    pub fn line(&self, start: Point, end: Point) -> ShapeSpec {
        ShapeSpec {
            shape: Shape::Line(DesignLine::new(start, end)),
            style: self.style.shape_style(),
        }
    }

    /// Arc from `start_angle` to `end_angle` along the shorter way round.
    pub fn arc(&self, center: Point, radius: f64, start_angle: f64, end_angle: f64) -> ShapeSpec {
        ShapeSpec {
            shape: Shape::Arc(DesignArc::between(center, radius, start_angle, end_angle)),
            style: self.style.shape_style(),
        }
    }

    /// Dashed hairline used while constructing arcs.
    pub fn guide(&self, start: Point, end: Point) -> ShapeSpec {
        ShapeSpec {
            shape: Shape::Line(DesignLine::new(start, end)),
            style: self.style.guide_style(),
        }
    }

    /// Text centered on `position`.
    pub fn text(&self, position: Point, content: &str) -> ShapeSpec {
        ShapeSpec {
            shape: Shape::Text(DesignText::centered(
                content,
                position,
                self.style.text_size(),
            )),
            style: self.style.text_style(),
        }
    }
}
