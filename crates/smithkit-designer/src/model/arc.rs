//! Circular arc segments and their path encoding.
//!
//! An arc is stored by center, radius, start angle and a signed sweep. Angles
//! are in radians with the screen orientation of the canvas (y grows
//! downward), so a positive sweep runs clockwise on screen. The path encoding
//! follows the SVG elliptical-arc command:
//!
//! ```text
//! M sx sy A r r 0 large sweep ex ey
//! ```

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use lyon::math::{vector, Angle};
use lyon::path::builder::SvgPathBuilder;
use lyon::path::Path;

use super::{points_bounds, DesignerShape, Point};

/// Normalize an angle difference into `(-π, π]`.
pub fn normalize_angle(diff: f64) -> f64 {
    let mut d = diff % TAU;
    if d > PI {
        d -= TAU;
    } else if d <= -PI {
        d += TAU;
    }
    d
}

/// Large-arc and sweep flags of the elliptical-arc path command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcFlags {
    /// Set when the arc spans more than half a turn.
    pub large_arc: bool,
    /// Set when the arc runs in the positive angle direction.
    pub sweep: bool,
}

impl ArcFlags {
    pub fn for_sweep(sweep_angle: f64) -> Self {
        Self {
            large_arc: sweep_angle.abs() > PI,
            sweep: sweep_angle >= 0.0,
        }
    }
}

impl From<ArcFlags> for lyon::path::ArcFlags {
    fn from(flags: ArcFlags) -> Self {
        lyon::path::ArcFlags {
            large_arc: flags.large_arc,
            sweep: flags.sweep,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    /// Signed sweep in radians.
    pub sweep_angle: f64,
}

impl DesignArc {
    /// Arc between two angles taking the shorter way round.
    pub fn between(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep_angle: normalize_angle(end_angle - start_angle),
        }
    }

    /// Arc with an explicit signed sweep, which may exceed half a turn.
    pub fn with_sweep(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep_angle,
        }
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    pub fn start_point(&self) -> Point {
        self.center.polar(self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.center.polar(self.radius, self.end_angle())
    }

    pub fn flags(&self) -> ArcFlags {
        ArcFlags::for_sweep(self.sweep_angle)
    }

    pub fn is_degenerate(&self) -> bool {
        self.radius <= f64::EPSILON
    }

    /// Path data in elliptical-arc command form.
    pub fn path_data(&self) -> String {
        let s = self.start_point();
        let e = self.end_point();
        let flags = self.flags();
        let mut out = String::new();
        let _ = write!(
            out,
            "M {} {} A {} {} 0 {} {} {} {}",
            fmt_coord(s.x),
            fmt_coord(s.y),
            fmt_coord(self.radius),
            fmt_coord(self.radius),
            u8::from(flags.large_arc),
            u8::from(flags.sweep),
            fmt_coord(e.x),
            fmt_coord(e.y),
        );
        out
    }

    /// Whether `angle` lies on the swept range.
    fn spans(&self, angle: f64) -> bool {
        let offset = if self.sweep_angle >= 0.0 {
            (angle - self.start_angle).rem_euclid(TAU)
        } else {
            (self.start_angle - angle).rem_euclid(TAU)
        };
        offset <= self.sweep_angle.abs()
    }
}

/// Coordinates rounded to thousandths, printed without trailing zeros.
fn fmt_coord(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0 + 0.0;
    format!("{rounded}")
}

impl DesignerShape for DesignArc {
    fn render(&self) -> Path {
        let mut builder = Path::builder().with_svg();
        builder.move_to(self.start_point().to_lyon());
        builder.arc_to(
            vector(self.radius as f32, self.radius as f32),
            Angle::radians(0.0),
            self.flags().into(),
            self.end_point().to_lyon(),
        );
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        let extremes = (0..4)
            .map(|q| q as f64 * PI / 2.0)
            .filter(|&a| self.spans(a))
            .map(|a| self.center.polar(self.radius, a));
        points_bounds(
            [self.start_point(), self.end_point()]
                .into_iter()
                .chain(extremes),
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.offset(dx, dy);
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        if p.distance_to(&self.start_point()) <= tolerance
            || p.distance_to(&self.end_point()) <= tolerance
        {
            return true;
        }
        let on_circle = (self.center.distance_to(&p) - self.radius).abs() <= tolerance;
        on_circle && self.spans(self.center.angle_to(&p))
    }
}
