//! Smith chart background.
//!
//! The chart is rebuilt from scratch whenever the canvas size changes. It is
//! made of two layers, both permanent and never interactive:
//!
//! - an optional reference bitmap, scaled to a fraction of the canvas height
//!   and centered on the canvas;
//! - a generated grid of resistance circles, reactance arcs and labels.
//!
//! The grid is always drawn when no bitmap is available. Both layers sit
//! below every user shape, with the bitmap at the very back.

use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use smithkit_core::{DashPattern, Rgb, StrokeWidth};
use smithkit_settings::ChartSettings;

use crate::canvas::Canvas;
use crate::error::DesignerError;
use crate::model::{DesignArc, DesignCircle, DesignImage, DesignLine, DesignText, Point, Shape};
use crate::style::ShapeStyle;

/// Normalized resistance and reactance values drawn on the grid.
pub const CHART_VALUES: [f64; 5] = [0.2, 0.5, 1.0, 2.0, 5.0];

const LABEL_SIZE: f64 = 12.0;
const REACTANCE_LABEL_RADIUS: f64 = 0.95;
const REACTANCE_LABEL_ROTATION: f64 = 30.0;
const TITLE: &str = "IMPEDANCE AND ADMITTANCE CHART";
const CAPTION: &str = "SMITH CHART";

/// Constant-resistance circle for normalized resistance `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceCircle {
    pub value: f64,
    pub center: Point,
    pub radius: f64,
}

impl ResistanceCircle {
    pub fn new(chart_center: Point, chart_radius: f64, value: f64) -> Self {
        let offset = chart_radius * value / (1.0 + value);
        Self {
            value,
            center: Point::new(chart_center.x + offset, chart_center.y),
            radius: chart_radius / (1.0 + value),
        }
    }

    /// The unit resistance circle is drawn solid, the others dashed.
    pub fn dashed(&self) -> bool {
        (self.value - 1.0).abs() > f64::EPSILON
    }

    pub fn label_position(&self) -> Point {
        Point::new(self.center.x + 5.0, self.center.y + 15.0)
    }

    pub fn label(&self) -> String {
        self.value.to_string()
    }
}

/// Constant-reactance arc for normalized reactance `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactanceArc {
    pub value: f64,
    /// Inductive arcs lie above the horizontal axis, capacitive below.
    pub inductive: bool,
    pub arc: DesignArc,
}

impl ReactanceArc {
    pub fn new(chart_center: Point, chart_radius: f64, value: f64, inductive: bool) -> Self {
        let rho = 1.0 / value;
        let a = chart_radius * (1.0 + rho * rho) / (2.0 * rho);
        let alpha = (chart_radius / a).asin();
        let sweep = PI + 2.0 * alpha;

        let arc = if inductive {
            DesignArc::with_sweep(
                Point::new(chart_center.x + chart_radius, chart_center.y + a),
                a,
                PI - alpha,
                sweep,
            )
        } else {
            DesignArc::with_sweep(
                Point::new(chart_center.x + chart_radius, chart_center.y - a),
                a,
                -(PI - alpha),
                -sweep,
            )
        };

        Self {
            value,
            inductive,
            arc,
        }
    }

    /// Angle (radians) of the label seen from the arc center.
    pub fn label_angle(&self) -> f64 {
        if self.inductive {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    }

    pub fn label_position(&self) -> Point {
        self.arc
            .center
            .polar(self.arc.radius * REACTANCE_LABEL_RADIUS, self.label_angle())
    }

    pub fn label_rotation(&self) -> f64 {
        if self.inductive {
            REACTANCE_LABEL_ROTATION
        } else {
            -REACTANCE_LABEL_ROTATION
        }
    }

    pub fn label(&self) -> String {
        if self.inductive {
            format!("j{}", self.value)
        } else {
            format!("-j{}", self.value)
        }
    }
}

/// Every grid primitive of a chart with the given center and radius, in the
/// order they are painted.
pub fn chart_primitives(center: Point, radius: f64) -> Vec<(Shape, ShapeStyle)> {
    let grid = ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::GRID);
    let dashed_grid = grid.with_dash(Some(DashPattern::GUIDE));
    let grid_label = ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::GRID).with_fill(Rgb::GRID);
    let black_label = ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::BLACK).with_fill(Rgb::BLACK);
    let caption = ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::CAPTION).with_fill(Rgb::CAPTION);

    let mut out = vec![
        (
            Shape::Circle(DesignCircle::new(center, radius)),
            ShapeStyle::stroked(StrokeWidth::default(), Rgb::BLACK),
        ),
        (
            Shape::Line(DesignLine::new(
                Point::new(center.x - radius, center.y),
                Point::new(center.x + radius, center.y),
            )),
            ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::BLACK),
        ),
    ];

    for value in CHART_VALUES {
        let circle = ResistanceCircle::new(center, radius, value);
        let style = if circle.dashed() { dashed_grid } else { grid };
        out.push((
            Shape::Circle(DesignCircle::new(circle.center, circle.radius)),
            style,
        ));
        out.push((
            Shape::Text(DesignText::new(
                circle.label(),
                circle.label_position(),
                LABEL_SIZE,
            )),
            grid_label,
        ));
    }

    for value in CHART_VALUES {
        for inductive in [true, false] {
            let arc = ReactanceArc::new(center, radius, value, inductive);
            out.push((
                Shape::Text(
                    DesignText::new(arc.label(), arc.label_position(), LABEL_SIZE)
                        .rotated(arc.label_rotation()),
                ),
                grid_label,
            ));
            out.push((Shape::Arc(arc.arc), dashed_grid));
        }
    }

    let annotations = [
        (
            DesignText::new("1.0 + j0.0", Point::new(center.x + 10.0, center.y + 10.0), 12.0),
            black_label,
        ),
        (
            DesignText::new(
                "\u{221e}",
                Point::new(center.x + radius - 20.0, center.y - 20.0),
                16.0,
            ),
            black_label,
        ),
        (
            DesignText::new("0.0", Point::new(center.x - radius + 10.0, center.y - 20.0), 12.0),
            black_label,
        ),
        (
            DesignText::top_centered(TITLE, Point::new(center.x, center.y - radius - 30.0), 14.0)
                .bold(),
            black_label,
        ),
        (
            DesignText::centered(CAPTION, Point::new(center.x, center.y - 20.0), 24.0).bold(),
            caption,
        ),
    ];
    out.extend(
        annotations
            .into_iter()
            .map(|(text, style)| (Shape::Text(text), style)),
    );

    out
}

/// Load the reference bitmap from disk.
pub fn load_chart_image(path: &Path) -> Result<RgbaImage, DesignerError> {
    let img = image::open(path).map_err(|source| DesignerError::ChartImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Owner of the chart objects on a canvas.
#[derive(Debug, Clone)]
pub struct SmithChart {
    settings: ChartSettings,
    bitmap: Option<Arc<RgbaImage>>,
    primitives: Vec<u64>,
    background: Option<u64>,
}

impl SmithChart {
    /// Chart for `settings`, loading the configured bitmap if there is one.
    ///
    /// A bitmap that fails to load is logged and the chart falls back to the
    /// generated grid.
    pub fn new(settings: &ChartSettings) -> Self {
        let bitmap = settings
            .image
            .as_deref()
            .and_then(|path| match load_chart_image(path) {
                Ok(img) => {
                    tracing::info!(
                        "Loaded chart image {} ({}x{})",
                        path.display(),
                        img.width(),
                        img.height()
                    );
                    Some(Arc::new(img))
                }
                Err(e) => {
                    tracing::warn!("{}; drawing the chart grid instead", e);
                    None
                }
            });

        Self::with_bitmap(settings, bitmap)
    }

    pub fn with_bitmap(settings: &ChartSettings, bitmap: Option<Arc<RgbaImage>>) -> Self {
        Self {
            settings: settings.clone(),
            bitmap,
            primitives: Vec::new(),
            background: None,
        }
    }

    pub fn has_bitmap(&self) -> bool {
        self.bitmap.is_some()
    }

    /// Whether the generated grid is part of the chart.
    pub fn draws_grid(&self) -> bool {
        self.settings.draw_grid || self.bitmap.is_none()
    }

    /// Chart radius for a canvas of the given size.
    pub fn radius_for(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.settings.radius_fraction
    }

    pub fn primitive_ids(&self) -> &[u64] {
        &self.primitives
    }

    pub fn background_id(&self) -> Option<u64> {
        self.background
    }

    /// Remove every chart object from the canvas, including bitmaps this
    /// chart did not place.
    pub fn clear(&mut self, canvas: &mut Canvas) {
        for id in self.primitives.drain(..) {
            canvas.remove_shape(id);
        }
        let stray = canvas.remove_where(|o| o.permanent && o.shape.is_image());
        if !stray.is_empty() {
            tracing::debug!("Removed {} chart bitmap(s)", stray.len());
        }
        self.background = None;
    }

    /// Rebuild the chart for the current canvas size.
    pub fn regenerate(&mut self, canvas: &mut Canvas) {
        self.clear(canvas);

        let center = canvas.center();
        let radius = self.radius_for(canvas.width(), canvas.height());

        if self.draws_grid() {
            for (shape, style) in chart_primitives(center, radius) {
                self.primitives.push(canvas.add_permanent(shape, style));
            }
            for id in self.primitives.iter().rev() {
                canvas.send_to_back(*id);
            }
        }

        if let Some(bitmap) = &self.bitmap {
            let target_height = canvas.height() * self.settings.image_height_fraction;
            let scale = target_height / bitmap.height().max(1) as f64;
            let image = DesignImage::new(Arc::clone(bitmap), center, scale);
            let id = canvas.add_permanent(
                Shape::Image(image),
                ShapeStyle::stroked(StrokeWidth::HAIRLINE, Rgb::BLACK),
            );
            canvas.send_to_back(id);
            self.background = Some(id);
        }

        tracing::info!(
            "Smith chart generated at ({:.1}, {:.1}) radius {:.1}: {} primitives, bitmap: {}",
            center.x,
            center.y,
            radius,
            self.primitives.len(),
            self.background.is_some()
        );
    }
}
