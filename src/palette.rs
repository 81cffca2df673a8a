//! # Continuous color palettes
//!
//! The dashboard colors each point from a scalar column (apparent magnitude or BP-RP).
//! Colors come from the plotters colormaps: Viridis is plotters' own [`ViridisRGB`],
//! Plasma and Cividis are [`DerivedColorMap`]s over five stops of the matplotlib maps
//! (plotters does not ship them). A [`ColorScale`] normalizes a column over its range.
use std::fmt;
use std::str::FromStr;

use plotters::style::colors::colormaps::{ColorMap, DerivedColorMap, ViridisRGB};
use plotters::style::RGBColor;

use crate::galaxy_errors::GalaxyError;

const PLASMA_STOPS: [RGBColor; 5] = [
    RGBColor(0x0d, 0x08, 0x87),
    RGBColor(0x7e, 0x03, 0xa8),
    RGBColor(0xcc, 0x47, 0x78),
    RGBColor(0xf8, 0x95, 0x40),
    RGBColor(0xf0, 0xf9, 0x21),
];

const CIVIDIS_STOPS: [RGBColor; 5] = [
    RGBColor(0x00, 0x22, 0x4e),
    RGBColor(0x41, 0x4d, 0x6b),
    RGBColor(0x7c, 0x7b, 0x78),
    RGBColor(0xbc, 0xaf, 0x6f),
    RGBColor(0xfe, 0xe8, 0x38),
];

/// `#rrggbb` form of a color.
pub fn hex(color: &RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Color schemes offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    #[default]
    Viridis,
    Plasma,
    Cividis,
}

impl Palette {
    pub const ALL: [Palette; 3] = [Palette::Viridis, Palette::Plasma, Palette::Cividis];

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Viridis => "Viridis",
            Palette::Plasma => "Plasma",
            Palette::Cividis => "Cividis",
        }
    }

    /// Color at position `t` of the palette, `t` clamped to `[0, 1]`.
    /// A NaN position maps to the middle of the palette.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) } as f32;
        match self {
            Palette::Viridis => ViridisRGB.get_color_normalized(t, 0.0, 1.0),
            Palette::Plasma => DerivedColorMap::new(&PLASMA_STOPS).get_color_normalized(t, 0.0, 1.0),
            Palette::Cividis => {
                DerivedColorMap::new(&CIVIDIS_STOPS).get_color_normalized(t, 0.0, 1.0)
            }
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|palette| palette.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                GalaxyError::InvalidControl(format!(
                    "unknown color scheme '{s}', expected one of Viridis, Plasma, Cividis"
                ))
            })
    }
}

/// Linear normalization of a column onto a palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub palette: Palette,
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning the finite values of a column. An empty column gives `[0, 0]`.
    pub fn fit<I>(palette: Palette, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0));
        ColorScale { palette, min, max }
    }

    /// Color of a value. A constant column maps every value to the palette midpoint.
    pub fn color(&self, value: f64) -> RGBColor {
        let span = self.max - self.min;
        if span <= 0.0 {
            return self.palette.sample(0.5);
        }
        self.palette.sample((value - self.min) / span)
    }
}
