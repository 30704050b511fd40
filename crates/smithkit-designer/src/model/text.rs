use lyon::path::Path;

use super::{box_outline, points_bounds, rotate_point, DesignerShape, Point};
use crate::font_manager;

/// Which point of the text box `position` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    TopLeft,
    /// Horizontally centered, top edge at `position.y`.
    TopCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignText {
    pub text: String,
    pub position: Point,
    pub font_size: f64,
    pub bold: bool,
    /// Clockwise rotation in degrees about `position`.
    pub rotation: f64,
    pub anchor: TextAnchor,
}

impl DesignText {
    pub fn new(text: impl Into<String>, position: Point, font_size: f64) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
            bold: false,
            rotation: 0.0,
            anchor: TextAnchor::TopLeft,
        }
    }

    pub fn centered(text: impl Into<String>, position: Point, font_size: f64) -> Self {
        Self {
            anchor: TextAnchor::Center,
            ..Self::new(text, position, font_size)
        }
    }

    pub fn top_centered(text: impl Into<String>, position: Point, font_size: f64) -> Self {
        Self {
            anchor: TextAnchor::TopCenter,
            ..Self::new(text, position, font_size)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Unrotated layout box `(x1, y1, x2, y2)`.
    pub fn layout_box(&self) -> (f64, f64, f64, f64) {
        let (w, h) = font_manager::text_extent(&self.text, self.font_size, self.bold);
        let (x, y) = match self.anchor {
            TextAnchor::TopLeft => (self.position.x, self.position.y),
            TextAnchor::TopCenter => (self.position.x - w / 2.0, self.position.y),
            TextAnchor::Center => (self.position.x - w / 2.0, self.position.y - h / 2.0),
        };
        (x, y, x + w, y + h)
    }
}

impl DesignerShape for DesignText {
    fn render(&self) -> Path {
        let corners = box_outline(self.layout_box(), self.rotation, self.position);
        let mut builder = Path::builder();
        builder.begin(corners[0].to_lyon());
        for c in &corners[1..] {
            builder.line_to(c.to_lyon());
        }
        builder.end(true);
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        points_bounds(box_outline(self.layout_box(), self.rotation, self.position))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let local = rotate_point(p, self.position, -self.rotation);
        let (x1, y1, x2, y2) = self.layout_box();
        local.x >= x1 - tolerance
            && local.x <= x2 + tolerance
            && local.y >= y1 - tolerance
            && local.y <= y2 + tolerance
    }
}
