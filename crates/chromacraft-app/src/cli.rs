//! Command-line arguments.

use chromacraft_core::{hex_to_rgb, AppState, HarmonyRule, Hsl};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ChromaCraft palette generator.
#[derive(Debug, Parser)]
#[command(name = "chromacraft", version, about = "Generate, extract and save color palettes")]
pub struct Cli {
    /// Directory holding saved palettes.
    #[arg(long, global = true, env = "CHROMACRAFT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the palette for a base color and harmony rule.
    Generate(ColorArgs),
    /// Print the dominant colors of an image.
    Extract {
        /// Image file (PNG, JPEG or WebP).
        image: PathBuf,
        /// Copy the hex code of the n-th color (1 = most frequent).
        #[arg(long, value_name = "N")]
        copy: Option<usize>,
    },
    /// Save the generated palette.
    Save {
        /// Palette name; defaults to "Palette <n>".
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        color: ColorArgs,
    },
    /// List saved palettes.
    List {
        /// Show only the last N saved palettes.
        #[arg(long, conflicts_with = "all")]
        recent: Option<usize>,
        /// Show every saved palette.
        #[arg(long)]
        all: bool,
    },
    /// Show a saved palette.
    Show { id: String },
    /// Delete a saved palette.
    Delete { id: String },
    /// Write the generated palette, or a saved one, to `<name>.json`.
    Export {
        #[arg(long)]
        name: Option<String>,
        /// Export a saved palette instead of generating one.
        #[arg(long, conflicts_with = "name")]
        id: Option<String>,
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[command(flatten)]
        color: ColorArgs,
    },
    /// Copy the base color's hex code to the clipboard.
    Copy(ColorArgs),
}

/// Base color, harmony and temperature shared by the generating commands.
#[derive(Debug, Clone, Args)]
pub struct ColorArgs {
    /// Base color as `#rrggbb` or `h,s,l`.
    #[arg(long, value_parser = parse_base, allow_hyphen_values = true)]
    pub base: Option<Hsl>,

    /// Harmony rule.
    #[arg(long, default_value = "complementary")]
    pub harmony: HarmonyRule,

    /// Warm (positive) or cool (negative) the base hue, -50 to 50.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub temperature: f64,
}

impl ColorArgs {
    /// Build the generator state these arguments describe.
    pub fn state(&self) -> AppState {
        let mut state = AppState::new(self.base.unwrap_or_default(), self.harmony);
        if self.temperature != 0.0 {
            state.adjust_temperature(self.temperature);
        }
        state
    }
}

/// Parse `#rrggbb`, `rrggbb` or `h,s,l`.
pub fn parse_base(value: &str) -> Result<Hsl, String> {
    if value.contains(',') {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let [h, s, l] = parts[..] else {
            return Err(format!("expected h,s,l but got {:?}", value));
        };
        let num = |v: &str| {
            let n = v
                .trim_end_matches(['%', '°'])
                .parse::<f64>()
                .map_err(|e| format!("invalid component {:?}: {}", v, e))?;
            if n.is_finite() {
                Ok(n)
            } else {
                Err(format!("component {:?} is not a finite number", v))
            }
        };
        return Ok(Hsl::new(num(h)?, num(s)?, num(l)?));
    }

    hex_to_rgb(value)
        .map(|rgb| rgb.to_hsl())
        .map_err(|e| e.to_string())
}
