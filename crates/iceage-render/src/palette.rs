//! Colour maps and fixed category colours.

use plotters::style::RGBColor;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Outline and fill of the early acquisition.
pub const EARLY_DATE: Rgb = Rgb(0xf5, 0xa4, 0x42);
/// Outline and fill of the later acquisition.
pub const LATER_DATE: Rgb = Rgb(0x8b, 0xc3, 0x4a);
/// Greenland fill on the site map.
pub const GREENLAND_FILL: Rgb = Rgb(0x31, 0x56, 0xde);

const BLUES: [Rgb; 9] = [
    Rgb(0xf7, 0xfb, 0xff),
    Rgb(0xde, 0xeb, 0xf7),
    Rgb(0xc6, 0xdb, 0xef),
    Rgb(0x9e, 0xca, 0xe1),
    Rgb(0x6b, 0xae, 0xd6),
    Rgb(0x42, 0x92, 0xc6),
    Rgb(0x21, 0x71, 0xb5),
    Rgb(0x08, 0x51, 0x9c),
    Rgb(0x08, 0x30, 0x6b),
];

const COOLWARM: [(f64, (f64, f64, f64)); 5] = [
    (0.0, (0.2298, 0.2987, 0.7537)),
    (0.25, (0.5543, 0.6901, 0.9955)),
    (0.5, (0.8654, 0.8654, 0.8654)),
    (0.75, (0.9567, 0.5980, 0.4773)),
    (1.0, (0.7057, 0.0156, 0.1502)),
];

/// Sequential white-to-blue map; `t` is clamped to `[0, 1]`.
pub fn blues(t: f64) -> Rgb {
    let t = clamp_unit(t) * (BLUES.len() - 1) as f64;
    let i = (t.floor() as usize).min(BLUES.len() - 2);
    BLUES[i].lerp(BLUES[i + 1], t - i as f64)
}

/// Diverging blue-grey-red map; `t` is clamped to `[0, 1]`.
pub fn coolwarm(t: f64) -> Rgb {
    let t = clamp_unit(t);
    let i = COOLWARM
        .windows(2)
        .position(|w| t <= w[1].0)
        .unwrap_or(COOLWARM.len() - 2);
    let (t0, a) = COOLWARM[i];
    let (t1, b) = COOLWARM[i + 1];
    let unit = |(r, g, b): (f64, f64, f64)| {
        Rgb(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    };
    unit(a).lerp(unit(b), (t - t0) / (t1 - t0))
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Marker colour name and hex value for a region code.
///
/// Unknown regions are drawn red.
pub fn region_color(region: &str) -> (&'static str, Rgb) {
    match region.trim() {
        "CE" => ("orange", Rgb(0xff, 0xa5, 0x00)),
        "CW" => ("yellow", Rgb(0xff, 0xd7, 0x00)),
        "NW" => ("green", Rgb(0x2e, 0x8b, 0x57)),
        "NE" => ("lime", Rgb(0x32, 0xcd, 0x32)),
        "NO" => ("blue", Rgb(0x1e, 0x5a, 0xd7)),
        "SW" => ("purple", Rgb(0x80, 0x00, 0x80)),
        _ => ("red", Rgb(0xd6, 0x27, 0x28)),
    }
}

/// Colour of an iceberg outline: early if the file name carries the early
/// date, later otherwise.
pub fn date_color(file_name: &str, early: &str) -> Rgb {
    if !early.is_empty() && file_name.contains(early) {
        EARLY_DATE
    } else {
        LATER_DATE
    }
}
