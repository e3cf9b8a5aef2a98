//! Current generator state: base color, harmony rule and the palette they
//! produce.

use crate::color::{Hsl, Rgb};
use crate::contrast::{readable_text_color, AccessibilityReport};
use crate::harmony::{generate, shift_temperature, HarmonyRule};
use crate::palette::{Palette, PaletteExport};
use serde::{Deserialize, Serialize};

/// A palette entry prepared for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub hsl: Hsl,
    pub rgb: Rgb,
    pub hex: String,
    /// Black or white, whichever is readable on top of this swatch.
    pub text_color: Rgb,
}

impl From<Hsl> for Swatch {
    fn from(hsl: Hsl) -> Self {
        let rgb = hsl.to_rgb();
        Self {
            hsl,
            rgb,
            hex: rgb.to_hex(),
            text_color: readable_text_color(rgb),
        }
    }
}

/// Application state driving palette generation.
///
/// Every setter regenerates the palette, so [`AppState::palette`] always
/// matches the current base and rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    base: Hsl,
    harmony: HarmonyRule,
    palette: Vec<Hsl>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Hsl::default(), HarmonyRule::default())
    }
}

impl AppState {
    pub fn new(base: Hsl, harmony: HarmonyRule) -> Self {
        Self {
            base,
            harmony,
            palette: generate(base, harmony),
        }
    }

    pub fn base(&self) -> Hsl {
        self.base
    }

    pub fn harmony(&self) -> HarmonyRule {
        self.harmony
    }

    /// The generated colors, in display order.
    pub fn palette(&self) -> &[Hsl] {
        &self.palette
    }

    pub fn set_base(&mut self, base: Hsl) {
        self.base = base;
        self.regenerate();
    }

    pub fn set_hue(&mut self, h: f64) {
        self.set_base(self.base.with_hue(h));
    }

    pub fn set_saturation(&mut self, s: f64) {
        self.set_base(self.base.with_saturation(s));
    }

    pub fn set_lightness(&mut self, l: f64) {
        self.set_base(self.base.with_lightness(l));
    }

    pub fn set_harmony(&mut self, harmony: HarmonyRule) {
        self.harmony = harmony;
        self.regenerate();
    }

    /// Shift the base hue warmer or cooler. See [`shift_temperature`].
    pub fn adjust_temperature(&mut self, adjustment: f64) {
        self.set_base(shift_temperature(self.base, adjustment));
    }

    /// Restore base and rule from a saved palette.
    ///
    /// Returns false, leaving the state untouched, if the palette is empty.
    pub fn apply_palette(&mut self, palette: &Palette) -> bool {
        let Some(base) = palette.base() else {
            return false;
        };
        self.base = base;
        self.harmony = palette.harmony;
        self.regenerate();
        true
    }

    pub fn base_rgb(&self) -> Rgb {
        self.base.to_rgb()
    }

    /// Hex of the base color, as placed on the clipboard.
    pub fn base_hex(&self) -> String {
        self.base.to_hex()
    }

    /// Display records for the current palette.
    pub fn swatches(&self) -> Vec<Swatch> {
        self.palette.iter().copied().map(Swatch::from).collect()
    }

    /// WCAG indicator for the base color against white.
    pub fn accessibility(&self) -> AccessibilityReport {
        AccessibilityReport::against_white(self.base_rgb())
    }

    /// Unsaved palette from the current state, ready for the store.
    pub fn to_palette(&self, name: impl Into<String>) -> Palette {
        Palette::new(name, &self.palette, self.harmony)
    }

    /// Export document for the current state.
    pub fn export(&self, name: Option<&str>) -> PaletteExport {
        PaletteExport::new(name, &self.palette, self.harmony)
    }

    fn regenerate(&mut self) {
        self.palette = generate(self.base, self.harmony);
    }
}
