//! Heatmap colors for forecast cells.
//!
//! Each [`Category`] owns three fixed color stops at ratios 0.0, 0.5 and 1.0.
//! A value is clamped into its domain, turned into a ratio and interpolated
//! linearly between the two surrounding stops.

use serde::{Deserialize, Serialize};

/// Foreground used on bright backgrounds.
pub const DARK_TEXT: Rgb = Rgb::new(0x1f, 0x29, 0x37);
/// Foreground used on dark backgrounds.
pub const LIGHT_TEXT: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Backgrounds brighter than this get [`DARK_TEXT`].
pub const LUMINANCE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub at: f64,
    pub color: Rgb,
}

const fn stop(at: f64, r: u8, g: u8, b: u8) -> ColorStop {
    ColorStop {
        at,
        color: Rgb::new(r, g, b),
    }
}

const TEMPERATURE_STOPS: [ColorStop; 3] = [
    stop(0.0, 59, 130, 246),
    stop(0.5, 253, 224, 71),
    stop(1.0, 220, 38, 38),
];

const PRECIPITATION_STOPS: [ColorStop; 3] = [
    stop(0.0, 248, 250, 252),
    stop(0.5, 96, 165, 250),
    stop(1.0, 30, 58, 138),
];

const WIND_STOPS: [ColorStop; 3] = [
    stop(0.0, 240, 253, 244),
    stop(0.5, 74, 222, 128),
    stop(1.0, 21, 128, 61),
];

/// Which forecast column a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Temperature,
    Precipitation,
    Wind,
}

impl Category {
    pub fn stops(&self) -> &'static [ColorStop] {
        match self {
            Category::Temperature => &TEMPERATURE_STOPS,
            Category::Precipitation => &PRECIPITATION_STOPS,
            Category::Wind => &WIND_STOPS,
        }
    }

    /// Domain used to color a window of values.
    ///
    /// Temperature spans the observed min..max. Precipitation (mm) and wind
    /// (km/h) start at zero and never span less than 1 mm / 10 km/h, so a dry
    /// or calm day stays pale instead of saturating.
    pub fn domain(&self, values: &[f64]) -> (f64, f64) {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            return (0.0, 0.0);
        }

        match self {
            Category::Temperature => (min, max),
            Category::Precipitation => (0.0, max.max(1.0)),
            Category::Wind => (0.0, max.max(10.0)),
        }
    }
}

/// Map `value` inside `[min, max]` to a color of `category`'s ramp.
pub fn interpolate(value: f64, min: f64, max: f64, category: Category) -> Rgb {
    let span = max - min;
    let ratio = if span > 0.0 && value.is_finite() {
        (value.clamp(min, max) - min) / span
    } else {
        0.0
    };
    sample(category.stops(), ratio)
}

fn sample(stops: &[ColorStop], ratio: f64) -> Rgb {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgb::new(0, 0, 0);
    };
    if ratio <= first.at {
        return first.color;
    }
    if ratio >= last.at {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if ratio <= hi.at {
            let t = if hi.at > lo.at { (ratio - lo.at) / (hi.at - lo.at) } else { 0.0 };
            return Rgb::new(
                lerp(lo.color.r, hi.color.r, t),
                lerp(lo.color.g, hi.color.g, t),
                lerp(lo.color.b, hi.color.b, t),
            );
        }
    }

    last.color
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

/// Perceptual luminance in `[0, 1]` (ITU-R BT.601 weights).
pub fn luminance(color: Rgb) -> f64 {
    (0.299 * f64::from(color.r) + 0.587 * f64::from(color.g) + 0.114 * f64::from(color.b)) / 255.0
}

pub fn foreground_for_luminance(luminance: f64) -> Rgb {
    if luminance > LUMINANCE_THRESHOLD { DARK_TEXT } else { LIGHT_TEXT }
}

/// Text color that stays readable on `background`.
pub fn contrast_color(background: Rgb) -> Rgb {
    foreground_for_luminance(luminance(background))
}
