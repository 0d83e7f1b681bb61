use std::collections::{BTreeMap, BTreeSet};

use palette::{LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

use crate::data::model::AlphaKey;

// ---------------------------------------------------------------------------
// Continuous colour maps
// ---------------------------------------------------------------------------

/// Sequential colour maps, sampled from evenly spaced sRGB anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Magma,
}

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const MAGMA: [(u8, u8, u8); 5] = [
    (0, 0, 4),
    (81, 18, 124),
    (183, 55, 121),
    (252, 137, 97),
    (252, 253, 191),
];

impl Colormap {
    fn anchors(self) -> &'static [(u8, u8, u8)] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Magma => &MAGMA,
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range and NaN are clamped.
    pub fn sample(self, t: f64) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = t as f32;

        let segments = (anchors.len() - 1) as f32;
        let pos = t * segments;
        let lo = (pos.floor() as usize).min(anchors.len() - 2);
        let frac = pos - lo as f32;

        // Blend in linear light so midpoints don't go muddy.
        let a = to_linear(anchors[lo]);
        let b = to_linear(anchors[lo + 1]);
        let mixed = Srgb::<f32>::from_linear(a.mix(b, frac)).into_format::<u8>();
        RGBColor(mixed.red, mixed.green, mixed.blue)
    }
}

fn to_linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Color mapping: alpha value → RGBColor
// ---------------------------------------------------------------------------

/// Maps the alpha values of one chart to colours, normalised over their range.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<AlphaKey, RGBColor>,
    default_color: RGBColor,
}

impl ColorMap {
    /// Build a colour map for the given alpha values.
    pub fn new(colormap: Colormap, values: &BTreeSet<AlphaKey>) -> Self {
        let finite = || values.iter().map(|k| k.0).filter(|v| v.is_finite());
        let min = finite().fold(f64::INFINITY, f64::min);
        let max = finite().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let mapping = values
            .iter()
            .map(|k| {
                let t = if span > 0.0 { (k.0 - min) / span } else { 0.0 };
                (*k, colormap.sample(t))
            })
            .collect();

        ColorMap {
            mapping,
            default_color: RGBColor(128, 128, 128),
        }
    }

    /// Look up the colour for a given alpha.
    pub fn color_for(&self, alpha: AlphaKey) -> RGBColor {
        self.mapping
            .get(&alpha)
            .copied()
            .unwrap_or(self.default_color)
    }
}
