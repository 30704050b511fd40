//! Stroke styling primitives shared by the designer and the settings crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// Stroke used for the chart grid and its value labels.
    pub const GRID: Rgb = Rgb::new(0x66, 0x66, 0x66);
    /// Fill used for the large chart caption.
    pub const CAPTION: Rgb = Rgb::new(0x33, 0x33, 0x33);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                Ok(Self::new(
                    channel(0).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                    channel(4).map_err(|_| invalid())?,
                ))
            }
            3 => {
                // #rgb shorthand doubles every nibble
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
                Ok(Self::new(
                    channel(0).map_err(|_| invalid())?,
                    channel(1).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Stroke width in canvas pixels. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct StrokeWidth(u32);

impl StrokeWidth {
    /// Hairline used by construction guides and most chart primitives.
    pub const HAIRLINE: StrokeWidth = StrokeWidth(1);

    pub fn new(value: i64) -> Result<Self> {
        if value <= 0 || value > u32::MAX as i64 {
            return Err(Error::InvalidStrokeWidth { value });
        }
        Ok(Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn px(self) -> f64 {
        self.0 as f64
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self(2)
    }
}

impl fmt::Display for StrokeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for StrokeWidth {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StrokeWidth> for u32 {
    fn from(value: StrokeWidth) -> Self {
        value.0
    }
}

/// On/off dash lengths in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on: f64,
    pub off: f64,
}

impl DashPattern {
    pub const DASHED: DashPattern = DashPattern::new(6.0, 6.0);
    pub const DOTTED: DashPattern = DashPattern::new(2.0, 2.0);
    /// Construction guides and the chart grid, independent of the user's line style.
    pub const GUIDE: DashPattern = DashPattern::new(5.0, 5.0);

    pub const fn new(on: f64, off: f64) -> Self {
        Self { on, off }
    }

    pub fn as_array(self) -> [f64; 2] {
        [self.on, self.off]
    }
}

/// User-selectable line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash pattern for this style; `None` draws a continuous stroke.
    pub fn dash_pattern(self) -> Option<DashPattern> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some(DashPattern::DASHED),
            Self::Dotted => Some(DashPattern::DOTTED),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid"),
            Self::Dashed => write!(f, "dashed"),
            Self::Dotted => write!(f, "dotted"),
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(Error::UnknownLineStyle {
                value: s.to_string(),
            }),
        }
    }
}
