//! Colors shared by the chart, the keyword cloud and the side panels.

use egui::Color32;

/// Background colors for different layers
pub mod bg {
    use super::*;

    /// Chart area background - darkest layer
    pub const CHART: Color32 = Color32::from_rgb(14, 17, 23);

    /// Panel backgrounds - slightly lighter than the chart
    pub const PANEL: Color32 = Color32::from_rgb(20, 22, 28);

    /// Term chips in the result list
    pub const CHIP: Color32 = Color32::from_rgb(35, 38, 48);
}

/// Text colors at different emphasis levels
pub mod text {
    use super::*;

    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
    pub const SECONDARY: Color32 = Color32::from_rgb(180, 180, 190);
    pub const MUTED: Color32 = Color32::from_rgb(120, 125, 135);
}

/// Lines drawn on the chart
pub mod chart {
    use super::*;

    pub const AXIS: Color32 = Color32::from_rgb(120, 125, 135);
    pub const SERIES: Color32 = Color32::from_rgb(6, 182, 212);
    pub const CONNECTOR: Color32 = Color32::from_rgb(80, 85, 95);
    pub const KEYWORD: Color32 = Color32::from_rgb(240, 240, 245);
}

/// Active page button
pub const ACTIVE: Color32 = Color32::from_rgb(255, 149, 0);

/// Twenty-color categorical palette for cloud words
pub const CATEGORY20: [Color32; 20] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xae, 0xc7, 0xe8),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0xff, 0xbb, 0x78),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0x98, 0xdf, 0x8a),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0xff, 0x98, 0x96),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0xc5, 0xb0, 0xd5),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xc4, 0x9c, 0x94),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0xf7, 0xb6, 0xd2),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
    Color32::from_rgb(0xc7, 0xc7, 0xc7),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0xdb, 0xdb, 0x8d),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
    Color32::from_rgb(0x9e, 0xda, 0xe5),
];

/// Palette color for the `i`-th cloud word
pub fn category(i: usize) -> Color32 {
    CATEGORY20[i % CATEGORY20.len()]
}

/// Marker hue scale: the smallest quantity in the dataset is yellow (50°),
/// the largest red (0°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityHue {
    min: f64,
    max: f64,
}

impl QuantityHue {
    const LOW_HUE: f32 = 50.0;

    pub fn from_quantities(quantities: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = quantities
            .into_iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), q| (lo.min(q), hi.max(q)));
        if min > max {
            return Self { min: 0.0, max: 0.0 };
        }
        Self { min, max }
    }

    pub fn hue(&self, quantity: f64) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            return Self::LOW_HUE;
        }
        let t = ((quantity - self.min) / span) as f32;
        Self::LOW_HUE * (1.0 - t)
    }

    /// Fully saturated, mid-lightness color for a quantity
    pub fn color(&self, quantity: f64) -> Color32 {
        hsl_to_rgb(self.hue(quantity), 1.0, 0.5)
    }
}

/// Convert HSL to RGB color
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color32 {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Color32::from_rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
