//! Color harmony generation.
//!
//! Each [`HarmonyRule`] maps a base color to a fixed, ordered set of colors.
//! The order is the display order.

use crate::color::Hsl;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest magnitude accepted by [`shift_temperature`].
pub const TEMPERATURE_RANGE: f64 = 50.0;

/// Hue shift in degrees at full temperature adjustment.
pub const TEMPERATURE_MAX_SHIFT: f64 = 30.0;

/// Error returned for an unrecognized harmony rule name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown harmony rule: {0:?}")]
pub struct InvalidHarmonyError(pub String);

/// How auxiliary colors relate to the base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyRule {
    /// Base and its opposite.
    #[default]
    Complementary,
    /// Base flanked by its neighbours 30° either side.
    Analogous,
    /// Three hues evenly spaced.
    Triadic,
    /// Base plus the two neighbours of its complement.
    SplitComplementary,
    /// Four hues evenly spaced.
    Tetradic,
    /// One hue at five lightness steps.
    Monochromatic,
}

impl HarmonyRule {
    pub const ALL: [HarmonyRule; 6] = [
        HarmonyRule::Complementary,
        HarmonyRule::Analogous,
        HarmonyRule::Triadic,
        HarmonyRule::SplitComplementary,
        HarmonyRule::Tetradic,
        HarmonyRule::Monochromatic,
    ];

    /// Name used in storage, exports and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            HarmonyRule::Complementary => "complementary",
            HarmonyRule::Analogous => "analogous",
            HarmonyRule::Triadic => "triadic",
            HarmonyRule::SplitComplementary => "split-complementary",
            HarmonyRule::Tetradic => "tetradic",
            HarmonyRule::Monochromatic => "monochromatic",
        }
    }

    /// Hue offsets in degrees, in display order.
    ///
    /// Monochromatic keeps the base hue for all five entries.
    pub fn hue_offsets(&self) -> &'static [f64] {
        match self {
            HarmonyRule::Complementary => &[0.0, 180.0],
            HarmonyRule::Analogous => &[-30.0, 0.0, 30.0],
            HarmonyRule::Triadic => &[0.0, 120.0, 240.0],
            HarmonyRule::SplitComplementary => &[0.0, 150.0, 210.0],
            HarmonyRule::Tetradic => &[0.0, 90.0, 180.0, 270.0],
            HarmonyRule::Monochromatic => &[0.0; 5],
        }
    }

    /// Number of colors this rule produces.
    pub fn color_count(&self) -> usize {
        self.hue_offsets().len()
    }
}

impl fmt::Display for HarmonyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyRule {
    type Err = InvalidHarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HarmonyRule::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| InvalidHarmonyError(s.to_string()))
    }
}

fn monochromatic(base: Hsl) -> Vec<Hsl> {
    let l = base.l;
    [
        (l - 30.0).max(20.0),
        (l - 15.0).max(30.0),
        l,
        (l + 15.0).min(90.0),
        (l + 30.0).min(95.0),
    ]
    .into_iter()
    .map(|lightness| base.with_lightness(lightness))
    .collect()
}

/// Generate the palette for `base` under `rule`.
pub fn generate(base: Hsl, rule: HarmonyRule) -> Vec<Hsl> {
    // Re-normalize in case the caller built the struct by hand
    let base = Hsl::new(base.h, base.s, base.l);

    match rule {
        HarmonyRule::Monochromatic => monochromatic(base),
        _ => rule
            .hue_offsets()
            .iter()
            .map(|&offset| base.rotate(offset))
            .collect(),
    }
}

/// Generate from a rule name, failing on unknown names.
pub fn generate_named(base: Hsl, rule: &str) -> Result<Vec<Hsl>, InvalidHarmonyError> {
    let rule: HarmonyRule = rule.parse()?;
    Ok(generate(base, rule))
}

/// Shift the hue warmer (positive) or cooler (negative).
///
/// `adjustment` is clamped to `[-50, 50]`; the extremes move the hue by 30°.
/// Warming moves toward red/orange, cooling toward blue. A non-finite
/// adjustment leaves the color alone.
pub fn shift_temperature(base: Hsl, adjustment: f64) -> Hsl {
    if !adjustment.is_finite() {
        return base;
    }
    let adjustment = adjustment.clamp(-TEMPERATURE_RANGE, TEMPERATURE_RANGE);
    if adjustment == 0.0 {
        return base;
    }
    base.rotate(-(adjustment / TEMPERATURE_RANGE) * TEMPERATURE_MAX_SHIFT)
}

/// [`shift_temperature`] followed by [`generate`].
pub fn generate_with_temperature(base: Hsl, rule: HarmonyRule, adjustment: f64) -> Vec<Hsl> {
    generate(shift_temperature(base, adjustment), rule)
}
