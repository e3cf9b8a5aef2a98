//! WCAG relative luminance and contrast ratio.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// Minimum contrast ratio for WCAG AA (normal text).
pub const WCAG_AA: f64 = 4.5;

/// Minimum contrast ratio for WCAG AAA (normal text).
pub const WCAG_AAA: f64 = 7.0;

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance as defined by WCAG 2.x, in `[0, 1]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Contrast ratio between two colors, in `[1, 21]`. Order does not matter.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn passes_aa(ratio: f64) -> bool {
    ratio >= WCAG_AA
}

pub fn passes_aaa(ratio: f64) -> bool {
    ratio >= WCAG_AAA
}

/// Contrast ratio and the WCAG levels it satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityReport {
    pub ratio: f64,
    pub aa: bool,
    pub aaa: bool,
}

impl AccessibilityReport {
    /// Report for `color` shown against a white background.
    pub fn against_white(color: Rgb) -> Self {
        evaluate(color, Rgb::WHITE)
    }

    /// Ratio formatted the way the indicator shows it, e.g. `4.50:1`.
    pub fn ratio_label(&self) -> String {
        format!("{:.2}:1", self.ratio)
    }
}

/// Evaluate a foreground/background pair.
pub fn evaluate(foreground: Rgb, background: Rgb) -> AccessibilityReport {
    let ratio = contrast_ratio(foreground, background);
    AccessibilityReport {
        ratio,
        aa: passes_aa(ratio),
        aaa: passes_aaa(ratio),
    }
}

/// Black or white, whichever reads better on `background`.
///
/// Uses the YIQ brightness approximation rather than luminance, so the
/// switch happens around mid-gray.
pub fn readable_text_color(background: Rgb) -> Rgb {
    let brightness = (background.r as u32 * 299
        + background.g as u32 * 587
        + background.b as u32 * 114) as f64
        / 1000.0;
    if brightness > 128.0 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}
