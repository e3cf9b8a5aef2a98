//! Saved palettes and the export document.

use crate::color::{Hsl, Rgb};
use crate::harmony::HarmonyRule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Name prefix used when exporting without an explicit name.
pub const DEFAULT_EXPORT_PREFIX: &str = "ChromaCraft Palette";

/// One entry of a saved palette, with its hex form cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub hex: String,
}

impl PaletteColor {
    pub fn hsl(&self) -> Hsl {
        Hsl::new(self.h, self.s, self.l)
    }
}

impl From<Hsl> for PaletteColor {
    fn from(color: Hsl) -> Self {
        Self {
            h: color.h,
            s: color.s,
            l: color.l,
            hex: color.to_hex(),
        }
    }
}

/// A named, saved palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Unique identifier, assigned by the store on save.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Colors in display order.
    pub colors: Vec<PaletteColor>,
    /// Rule that produced the colors.
    pub harmony: HarmonyRule,
    /// When the palette was saved.
    pub created: DateTime<Utc>,
}

impl Palette {
    /// Build an unsaved palette. The id stays empty until the store assigns one.
    pub fn new(name: impl Into<String>, colors: &[Hsl], harmony: HarmonyRule) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            colors: colors.iter().copied().map(PaletteColor::from).collect(),
            harmony,
            created: Utc::now(),
        }
    }

    /// The first color, which acts as the base when a palette is reloaded.
    pub fn base(&self) -> Option<Hsl> {
        self.colors.first().map(PaletteColor::hsl)
    }

    pub fn hsl_colors(&self) -> Vec<Hsl> {
        self.colors.iter().map(PaletteColor::hsl).collect()
    }

    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Older collections used millisecond timestamps as numeric ids.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(u64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
        RawId::Float(id) => id.to_string(),
    })
}

/// A color as written to an export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportColor {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
}

impl From<Hsl> for ExportColor {
    fn from(hsl: Hsl) -> Self {
        let rgb = hsl.to_rgb();
        Self {
            hex: rgb.to_hex(),
            rgb,
            hsl,
        }
    }
}

/// The downloadable palette document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteExport {
    pub name: String,
    pub colors: Vec<ExportColor>,
    pub harmony: HarmonyRule,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
}

impl PaletteExport {
    /// Build an export. Without a name, one is derived from the export time.
    pub fn new(name: Option<&str>, colors: &[Hsl], harmony: HarmonyRule) -> Self {
        let export_date = Utc::now();
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", DEFAULT_EXPORT_PREFIX, export_date.timestamp_millis()),
        };
        Self {
            name,
            colors: colors.iter().copied().map(ExportColor::from).collect(),
            harmony,
            export_date,
        }
    }

    /// Export a saved palette under its own name.
    pub fn from_palette(palette: &Palette) -> Self {
        Self::new(Some(&palette.name), &palette.hsl_colors(), palette.harmony)
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Download file name, `<name>.json` with unsafe characters replaced.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}.json", safe)
    }
}
