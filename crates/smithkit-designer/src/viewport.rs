//! Viewport and coordinate transformation for pointer input.
//!
//! Converts between pixel coordinates of the host surface and canvas
//! coordinates. Both systems have (0,0) at the top-left with Y growing
//! downward; the viewport only adds zoom and pan.

use std::fmt;

use crate::model::Point;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates an identity viewport for a surface of the given size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level; values outside the supported range are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts pixel coordinates to canvas coordinates.
    ///
    /// ```text
    /// canvas_x = (pixel_x - pan_x) / zoom
    /// canvas_y = (pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_canvas(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.pan_x) / self.zoom,
            (pixel_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts canvas coordinates to pixel coordinates.
    pub fn canvas_to_pixel(&self, point: &Point) -> (f64, f64) {
        (
            point.x * self.zoom + self.pan_x,
            point.y * self.zoom + self.pan_y,
        )
    }

    /// Zooms while keeping `canvas_point` at the same pixel position.
    pub fn zoom_to_point(&mut self, canvas_point: &Point, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }
        let (pixel_x, pixel_y) = self.canvas_to_pixel(canvas_point);
        self.zoom = new_zoom;
        self.pan_x = pixel_x - canvas_point.x * new_zoom;
        self.pan_y = pixel_y - canvas_point.y * new_zoom;
    }

    /// Resets viewport to 1:1 zoom without pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
