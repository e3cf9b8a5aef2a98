//! Color model conversions between HSL, RGB and hex strings.
//!
//! HSL uses degrees for hue and percentages for saturation and lightness,
//! matching what the sliders and the color wheel produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a 6-digit hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color: {input:?} (expected 6 hex digits with optional '#')")]
pub struct ParseHexError {
    /// The rejected input.
    pub input: String,
}

/// A color in HSL space.
///
/// Always normalized: `h` in `[0, 360)`, `s` and `l` in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Lightness in percent.
    pub l: f64,
}

impl Hsl {
    /// Create a normalized HSL color. Hue wraps, saturation and lightness clamp.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_percent(s),
            l: clamp_percent(l),
        }
    }

    /// Same color with a different hue.
    pub fn with_hue(self, h: f64) -> Self {
        Self::new(h, self.s, self.l)
    }

    /// Same color with a different saturation.
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    /// Same color with a different lightness.
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Rotate the hue by `degrees`, wrapping around the wheel.
    pub fn rotate(self, degrees: f64) -> Self {
        self.with_hue(self.h + degrees)
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

impl Default for Hsl {
    fn default() -> Self {
        Self::new(0.0, 100.0, 71.0)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°, {}%, {}%",
            self.h.round(),
            self.s.round(),
            self.l.round()
        )
    }
}

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

/// Wrap a hue into `[0, 360)`. NaN and infinities become 0.
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn clamp_percent(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(0.0, 100.0)
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Convert HSL (degrees, percent, percent) to RGB.
///
/// Inputs are normalized first, so out-of-range values never produce
/// out-of-range channels.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = normalize_hue(h) / 360.0;
    let s = clamp_percent(s) / 100.0;
    let l = clamp_percent(l) / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, h)),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Render channels as a lowercase, zero-padded `#rrggbb` string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse a `#rrggbb` or `rrggbb` string (case-insensitive).
///
/// Shorthand (`#abc`), alpha, surrounding whitespace and any other shape are
/// rejected; there is no partial parsing.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ParseHexError> {
    let err = || ParseHexError {
        input: hex.to_string(),
    };

    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Convert RGB back to HSL. Lossy: converting the result back may differ by
/// a unit of rounding.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_grayscale_when_unsaturated() {
        assert_eq!(hsl_to_rgb(123.0, 0.0, 50.0), Rgb::new(128, 128, 128));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgb::BLACK);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 100.0), Rgb::WHITE);
    }

    #[test]
    fn test_default_base_color() {
        // Default starting color of the generator
        assert_eq!(Hsl::default().to_hex(), "#ff6b6b");
    }

    #[test]
    fn test_reference_conversions() {
        // Rising edge, plateau, falling edge and floor of the hue ramp
        assert_eq!(hsl_to_hex(20.0, 100.0, 50.0), "#ff5500");
        assert_eq!(hsl_to_hex(210.0, 50.0, 40.0), "#336699");
        // Light colors take the l + s - l*s branch
        assert_eq!(hsl_to_hex(330.0, 60.0, 80.0), "#ebadcc");
        assert_eq!(hsl_to_hex(77.0, 100.0, 0.0), "#000000");
        assert_eq!(hsl_to_hex(77.0, 100.0, 100.0), "#ffffff");
    }

    #[test]
    fn test_non_finite_inputs_are_normalized() {
        let c = Hsl::new(f64::NAN, 50.0, 50.0);
        assert_eq!((c.h, c.s, c.l), (0.0, 50.0, 50.0));

        let c = Hsl::new(f64::INFINITY, f64::NAN, f64::NEG_INFINITY);
        assert_eq!((c.h, c.s, c.l), (0.0, 0.0, 0.0));

        assert_eq!(Hsl::default().rotate(f64::NAN).h, 0.0);
        assert_eq!(hsl_to_rgb(f64::NAN, 100.0, 50.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_out_of_range_inputs_are_normalized() {
        assert_eq!(hsl_to_rgb(360.0, 100.0, 50.0), hsl_to_rgb(0.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(-120.0, 100.0, 50.0), hsl_to_rgb(240.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(0.0, 150.0, -10.0), Rgb::BLACK);
    }

    #[test]
    fn test_hsl_new_normalizes() {
        let c = Hsl::new(-30.0, 120.0, -5.0);
        assert_eq!(c.h, 330.0);
        assert_eq!(c.s, 100.0);
        assert_eq!(c.l, 0.0);

        assert_eq!(Hsl::new(720.0, 50.0, 50.0).h, 0.0);
        assert_eq!(Hsl::new(-1e-20, 50.0, 50.0).h, 0.0);
    }

    #[test]
    fn test_rgb_to_hex_pads_and_lowercases() {
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_to_hex(10, 171, 255), "#0aabff");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ff6b6b").unwrap(), Rgb::new(255, 107, 107));
        assert_eq!(hex_to_rgb("FF6B6B").unwrap(), Rgb::new(255, 107, 107));
        assert_eq!("#0aAbFf".parse::<Rgb>().unwrap(), Rgb::new(10, 171, 255));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        let malformed = [
            "", "#", "#abc", "abc", "#ff6b6", "#ff6b6b0", "##ff6b6b", "#gg0000", " #ff6b6b",
            "#ff6b6b ", "#ff6b6bff",
        ];
        for bad in malformed {
            let err = hex_to_rgb(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#ff6b6b", "#0aabff", "#123456", "#fedcba"] {
            let rgb = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb.to_hex(), hex);
        }

        // Uppercase input comes back lowercase
        assert_eq!(hex_to_rgb("#ABCDEF").unwrap().to_hex(), "#abcdef");
    }

    #[test]
    fn test_rgb_to_hsl() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));

        let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert!((blue.h - 240.0).abs() < 1e-9);

        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(gray.s, 0.0);
    }

    #[test]
    fn test_rgb_hsl_rgb_is_close() {
        for rgb in [Rgb::new(255, 107, 107), Rgb::new(12, 200, 99), Rgb::new(40, 40, 90)] {
            let back = rgb.to_hsl().to_rgb();
            assert!((back.r as i16 - rgb.r as i16).abs() <= 1);
            assert!((back.g as i16 - rgb.g as i16).abs() <= 1);
            assert!((back.b as i16 - rgb.b as i16).abs() <= 1);
        }
    }
}
