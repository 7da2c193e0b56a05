//! Color arithmetic for token derivation.
//!
//! Design tokens carry colors as hex strings (`"#051556"`, `"#fff"`). This
//! module parses them into [`Rgb`], and provides the two blending operations
//! the rest of the crate is built on:
//!
//! - **RGB mixing** ([`Rgb::mix`]): a straight per-channel interpolation, used
//!   for the legacy color block where shades must match what other tooling
//!   produces for the same inputs.
//! - **LAB interpolation** ([`Rgb::lerp_lab`]): interpolation in CIE LAB, a
//!   perceptually uniform space. Palette steps generated this way look evenly
//!   spaced regardless of hue, which is what the token engine wants for
//!   hover/active/background variants.
//!
//! # Example
//!
//! ```rust
//! use themeweave::colorspace::Rgb;
//!
//! let navy = Rgb::from_hex("#051556").unwrap();
//! let white = Rgb::from_hex("#fff").unwrap();
//!
//! assert_eq!(navy.mix(white, 0.0).to_hex(), "#051556");
//! assert_eq!(navy.mix(white, 100.0).to_hex(), "#ffffff");
//!
//! // Perceptual tint, 40% of the way to white
//! let tint = navy.lerp_lab(white, 0.4);
//! assert!(tint.relative_luminance() > navy.relative_luminance());
//! ```

use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Error returned when a string is not a recognizable hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    input: String,
}

impl ParseColorError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid hex color '{}' (expected #rgb, #rrggbb or #rrggbbaa)",
            self.input
        )
    }
}

impl std::error::Error for ParseColorError {}

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (alpha is ignored).
    ///
    /// The leading `#` is optional and surrounding whitespace is trimmed.
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        match hex.len() {
            // #rgb -> #rrggbb
            3 => {
                let mut channels = [0u8; 3];
                for (i, channel) in channels.iter_mut().enumerate() {
                    *channel = u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| err())? * 17;
                }
                Ok(Rgb(channels[0], channels[1], channels[2]))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| err())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| err())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| err())?;
                if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).map_err(|_| err())?;
                }
                Ok(Rgb(r, g, b))
            }
            _ => Err(err()),
        }
    }

    /// Formats as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Mixes `other` into `self` by `amount` percent (0–100) in RGB space.
    ///
    /// `0` returns `self`, `100` returns `other`. Values outside the range are
    /// clamped.
    pub fn mix(self, other: Rgb, amount: f64) -> Rgb {
        let p = (amount / 100.0).clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let a = a as f64;
            let b = b as f64;
            (a + (b - a) * p).round() as u8
        };
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }

    /// Composites `self` at `alpha` opacity (0.0–1.0) over an opaque `background`.
    pub fn over(self, background: Rgb, alpha: f64) -> Rgb {
        background.mix(self, alpha * 100.0)
    }

    /// Interpolates toward `other` in CIE LAB space; `t` is clamped to 0.0–1.0.
    pub fn lerp_lab(self, other: Rgb, t: f64) -> Rgb {
        Lab::from_rgb(self)
            .lerp(Lab::from_rgb(other), t.clamp(0.0, 1.0))
            .to_rgb()
    }

    /// WCAG relative luminance (0.0 black – 1.0 white).
    pub fn relative_luminance(self) -> f64 {
        0.2126 * srgb_to_linear(self.0)
            + 0.7152 * srgb_to_linear(self.1)
            + 0.0722 * srgb_to_linear(self.2)
    }

    /// True when the color reads as dark (luminance below the midpoint).
    pub fn is_dark(self) -> bool {
        self.relative_luminance() < 0.179
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// CIE LAB, D65 white point

const WHITE_POINT: [f64; 3] = [0.95047, 1.0, 1.08883];

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Above this, the LAB transfer function is a plain cube root.
const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Lab {
    l: f64,
    a: f64,
    b: f64,
}

impl Lab {
    fn from_rgb(rgb: Rgb) -> Self {
        let linear = [rgb.0, rgb.1, rgb.2].map(srgb_to_linear);
        let xyz = apply_matrix(&SRGB_TO_XYZ, linear);
        let [fx, fy, fz] = [0, 1, 2].map(|i| lab_forward(xyz[i] / WHITE_POINT[i]));

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    fn to_rgb(self) -> Rgb {
        let fy = (self.l + 16.0) / 116.0;
        let f = [fy + self.a / 500.0, fy, fy - self.b / 200.0];
        let xyz = [0, 1, 2].map(|i| WHITE_POINT[i] * lab_inverse(f[i]));
        let [r, g, b] = apply_matrix(&XYZ_TO_SRGB, xyz).map(linear_to_srgb);
        Rgb(r, g, b)
    }

    fn lerp(self, other: Lab, t: f64) -> Lab {
        let step = |from: f64, to: f64| from + (to - from) * t;
        Lab {
            l: step(self.l, other.l),
            a: step(self.a, other.a),
            b: step(self.b, other.b),
        }
    }
}

fn apply_matrix(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// sRGB channel to linear light.
fn srgb_to_linear(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// Linear light to an sRGB channel; out-of-gamut values are clamped.
fn linear_to_srgb(v: f64) -> u8 {
    let v = v.clamp(0.0, 1.0);
    let encoded = if v > 0.0031308 {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    } else {
        v * 12.92
    };
    (encoded * 255.0).round() as u8
}

fn lab_forward(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

fn lab_inverse(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > LAB_EPSILON {
        cubed
    } else {
        (116.0 * f - 16.0) / LAB_KAPPA
    }
}
