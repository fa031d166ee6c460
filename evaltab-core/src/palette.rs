//! Perceptual color scales for the symbol palette.
//!
//! A [`ColorScale`] places its stops evenly on `[0, 1]` and interpolates
//! between neighbours in CIE LCh (D65 white, shortest hue path). Sampling
//! converts back to sRGB, clips to the displayable range and rounds to the
//! nearest 8-bit channel value.

use crate::error::PaletteError;

// D65 reference white and the CIE Lab piecewise constants.
const XN: f64 = 0.950470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088830;
const T0: f64 = 0.137931034;
const T1: f64 = 0.206896552;
const T2: f64 = 0.12841855;
const T3: f64 = 0.008856452;

/// An sRGB color with channels in `0..=255`, possibly out of gamut until
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// A color in cylindrical Lab. `h` is `None` for achromatic colors.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lch {
    l: f64,
    c: f64,
    h: Option<f64>,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb`, `#rrggbb`, `rgb` or `#rgb`.
    pub fn from_hex(value: &str) -> Result<Self, PaletteError> {
        let invalid = || PaletteError::InvalidHex {
            value: value.to_string(),
        };
        let digits = value.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(f64::from)
                .map_err(|_| invalid())
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lower-case `rrggbb` without a leading `#`, clipped and rounded.
    pub fn to_hex(self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 255.0) + 0.5).floor() as u8;
        format!(
            "{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    fn to_lch(self) -> Lch {
        let r = rgb_xyz(self.r);
        let g = rgb_xyz(self.g);
        let b = rgb_xyz(self.b);
        let x = xyz_lab((0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / XN);
        let y = xyz_lab((0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / YN);
        let z = xyz_lab((0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / ZN);

        let l = (116.0 * y - 16.0).max(0.0);
        let a = 500.0 * (x - y);
        let b = 200.0 * (y - z);

        let c = (a * a + b * b).sqrt();
        let h = if (c * 10000.0).round() == 0.0 {
            None
        } else {
            Some((b.atan2(a).to_degrees() + 360.0) % 360.0)
        };
        Lch { l, c, h }
    }
}

impl Lch {
    fn to_rgb(self) -> Rgb {
        let h = self.h.unwrap_or(0.0).to_radians();
        let a = h.cos() * self.c;
        let b = h.sin() * self.c;

        let y = (self.l + 16.0) / 116.0;
        let x = y + a / 500.0;
        let z = y - b / 200.0;
        let y = YN * lab_xyz(y);
        let x = XN * lab_xyz(x);
        let z = ZN * lab_xyz(z);

        Rgb::new(
            xyz_rgb(3.2404542 * x - 1.5371385 * y - 0.4985314 * z),
            xyz_rgb(-0.9692660 * x + 1.8760108 * y + 0.0415560 * z),
            xyz_rgb(0.0556434 * x - 0.2040259 * y + 1.0572252 * z),
        )
    }

    fn mix(self, other: Lch, f: f64) -> Lch {
        let h = match (self.h, other.h) {
            (Some(h0), Some(h1)) => {
                let dh = if h1 > h0 && h1 - h0 > 180.0 {
                    h1 - (h0 + 360.0)
                } else if h1 < h0 && h0 - h1 > 180.0 {
                    h1 + 360.0 - h0
                } else {
                    h1 - h0
                };
                Some(h0 + f * dh)
            }
            (Some(h0), None) => Some(h0),
            (None, Some(h1)) => Some(h1),
            (None, None) => None,
        };
        Lch {
            l: self.l + f * (other.l - self.l),
            c: self.c + f * (other.c - self.c),
            h,
        }
    }
}

fn rgb_xyz(channel: f64) -> f64 {
    let v = channel / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn xyz_lab(t: f64) -> f64 {
    if t > T3 {
        t.powf(1.0 / 3.0)
    } else {
        t / T2 + T0
    }
}

fn lab_xyz(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

fn xyz_rgb(v: f64) -> f64 {
    255.0
        * if v <= 0.00304 {
            12.92 * v
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        }
}

/// A multi-stop gradient interpolated in LCh.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<Rgb>,
}

impl ColorScale {
    pub fn new(stops: Vec<Rgb>) -> Result<Self, PaletteError> {
        if stops.len() < 2 {
            return Err(PaletteError::TooFewStops { count: stops.len() });
        }
        Ok(Self { stops })
    }

    /// Build a scale from hex strings such as `"ffa500"` or `"#4b0082"`.
    pub fn from_hex<S: AsRef<str>>(stops: &[S]) -> Result<Self, PaletteError> {
        let parsed = stops
            .iter()
            .map(|s| Rgb::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Color at position `t` in `[0, 1]`. Positions on a stop return that
    /// stop unchanged.
    pub fn sample(&self, t: f64) -> Rgb {
        let last = self.stops.len() - 1;
        if t >= 1.0 {
            return self.stops[last];
        }
        for k in 0..last {
            let p0 = k as f64 / last as f64;
            let p1 = (k + 1) as f64 / last as f64;
            if t <= p0 {
                return self.stops[k];
            }
            if t < p1 {
                let f = (t - p0) / (p1 - p0);
                let from = self.stops[k].to_lch();
                let to = self.stops[k + 1].to_lch();
                return from.mix(to, f).to_rgb();
            }
        }
        self.stops[last]
    }

    /// `count` evenly spaced samples as `rrggbb` strings.
    pub fn colors(&self, count: usize) -> Result<Vec<String>, PaletteError> {
        match count {
            0 => Err(PaletteError::EmptyPalette),
            1 => Ok(vec![self.stops[0].to_hex()]),
            n => Ok((0..n)
                .map(|i| self.sample(i as f64 / (n - 1) as f64).to_hex())
                .collect()),
        }
    }
}
