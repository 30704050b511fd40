//! Stroke settings for new shapes and their application to the selection.

use serde::{Deserialize, Serialize};
use smithkit_core::{DashPattern, LineStyle, Rgb, StrokeWidth};
use smithkit_settings::StyleDefaults;

/// Resolved paint attributes of one canvas object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub stroke_width: StrokeWidth,
    pub stroke: Rgb,
    pub fill: Option<Rgb>,
    pub dash: Option<DashPattern>,
}

impl ShapeStyle {
    pub fn stroked(stroke_width: StrokeWidth, stroke: Rgb) -> Self {
        Self {
            stroke_width,
            stroke,
            fill: None,
            dash: None,
        }
    }

    pub fn with_dash(mut self, dash: Option<DashPattern>) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Partial style change; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleUpdate {
    pub stroke_width: Option<StrokeWidth>,
    pub stroke_color: Option<Rgb>,
    pub line_style: Option<LineStyle>,
}

impl StyleUpdate {
    pub fn stroke_width(width: StrokeWidth) -> Self {
        Self {
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn stroke_color(color: Rgb) -> Self {
        Self {
            stroke_color: Some(color),
            ..Self::default()
        }
    }

    pub fn line_style(style: LineStyle) -> Self {
        Self {
            line_style: Some(style),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_width.is_none() && self.stroke_color.is_none() && self.line_style.is_none()
    }

    /// Apply the provided fields to an existing object's style.
    ///
    /// Filled objects (text) follow the stroke colour.
    pub fn apply_to(&self, style: &mut ShapeStyle) {
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }
        if let Some(color) = self.stroke_color {
            style.stroke = color;
            if style.fill.is_some() {
                style.fill = Some(color);
            }
        }
        if let Some(line_style) = self.line_style {
            style.dash = line_style.dash_pattern();
        }
    }
}

/// Current stroke settings used for every new shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleSettings {
    pub stroke_width: StrokeWidth,
    pub stroke_color: Rgb,
    pub line_style: LineStyle,
}

impl StyleSettings {
    pub fn merge(&mut self, update: &StyleUpdate) {
        if let Some(width) = update.stroke_width {
            self.stroke_width = width;
        }
        if let Some(color) = update.stroke_color {
            self.stroke_color = color;
        }
        if let Some(line_style) = update.line_style {
            self.line_style = line_style;
        }
    }

    /// Style of a committed user shape.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle::stroked(self.stroke_width, self.stroke_color)
            .with_dash(self.line_style.dash_pattern())
    }

    /// Hairline dashed construction guide in the current colour.
    pub fn guide_style(&self) -> ShapeStyle {
        ShapeStyle::stroked(StrokeWidth::HAIRLINE, self.stroke_color)
            .with_dash(Some(DashPattern::GUIDE))
    }

    /// Text is filled with the stroke colour and sized from the stroke width.
    pub fn text_style(&self) -> ShapeStyle {
        ShapeStyle::stroked(self.stroke_width, self.stroke_color).with_fill(self.stroke_color)
    }

    pub fn text_size(&self) -> f64 {
        self.stroke_width.px() * 8.0
    }
}

impl From<&StyleDefaults> for StyleSettings {
    fn from(defaults: &StyleDefaults) -> Self {
        Self {
            stroke_width: defaults.stroke_width,
            stroke_color: defaults.stroke_color,
            line_style: defaults.line_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(v: i64) -> StrokeWidth {
        StrokeWidth::new(v).unwrap()
    }

    #[test]
    fn test_merge_only_touches_provided_fields() {
        let mut settings = StyleSettings::default();
        settings.merge(&StyleUpdate::stroke_color(Rgb::new(255, 0, 0)));
        assert_eq!(settings.stroke_color, Rgb::new(255, 0, 0));
        assert_eq!(settings.stroke_width, width(2));
        assert_eq!(settings.line_style, LineStyle::Solid);
    }

    #[test]
    fn test_derived_styles() {
        let settings = StyleSettings {
            stroke_width: width(3),
            stroke_color: Rgb::new(0, 0, 255),
            line_style: LineStyle::Dotted,
        };
        assert_eq!(settings.shape_style().dash, Some(DashPattern::DOTTED));
        let guide = settings.guide_style();
        assert_eq!(guide.stroke_width, StrokeWidth::HAIRLINE);
        assert_eq!(guide.dash, Some(DashPattern::GUIDE));
        assert_eq!(guide.stroke, Rgb::new(0, 0, 255));
        assert_eq!(settings.text_size(), 24.0);
        assert_eq!(settings.text_style().fill, Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_update_recolours_text_fill_but_not_outlines() {
        let mut outline = ShapeStyle::stroked(width(2), Rgb::BLACK);
        let mut text = ShapeStyle::stroked(width(2), Rgb::BLACK).with_fill(Rgb::BLACK);
        let update = StyleUpdate::stroke_color(Rgb::new(0, 128, 0));
        update.apply_to(&mut outline);
        update.apply_to(&mut text);
        assert_eq!(outline.fill, None);
        assert_eq!(text.fill, Some(Rgb::new(0, 128, 0)));
    }

    #[test]
    fn test_solid_update_clears_dash() {
        let mut style = ShapeStyle::stroked(width(2), Rgb::BLACK).with_dash(Some(DashPattern::DASHED));
        StyleUpdate::line_style(LineStyle::Solid).apply_to(&mut style);
        assert_eq!(style.dash, None);
    }
}
