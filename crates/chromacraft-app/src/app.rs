//! Command dispatch.

use crate::cli::{Cli, Command};
use crate::clipboard::{copy_text, CopyOutcome};
use crate::config::AppConfig;
use crate::image_input::load_pixels;
use chromacraft_core::storage::FileStorage;
use chromacraft_core::{
    extract_colors, AppState, ExtractError, ExtractedColor, Palette, PaletteExport, PaletteStore,
    StorageError, StoreError, Swatch,
};
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to serialize export: {0}")]
    Export(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("No color #{index}: the image has {count} colors")]
    NoSuchColor { index: usize, count: usize },
}

/// Run a parsed command line, writing results to stdout.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::from_cli(&cli);
    let stdout = io::stdout();
    execute(&config, cli.command, &mut stdout.lock())
}

fn open_store(config: &AppConfig) -> Result<PaletteStore<FileStorage>, AppError> {
    let storage = FileStorage::new(config.data_dir.clone())?;
    Ok(PaletteStore::open_with_key(Arc::new(storage), &config.storage_key))
}

/// Execute one command against `config`, writing human-readable output to `out`.
pub(crate) fn execute(
    config: &AppConfig,
    command: Command,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command {
        Command::Generate(color) => {
            write_state(out, &color.state())?;
        }
        Command::Extract { image, copy } => {
            let Some(pixels) = load_pixels(&image, &config.extraction)? else {
                writeln!(out, "{} is not an image; nothing extracted", image.display())?;
                return Ok(());
            };
            let colors = extract_colors(&pixels, &config.extraction);
            for color in &colors {
                writeln!(out, "{}", format_extracted(color))?;
            }
            if let Some(index) = copy {
                let hex = nth_color(&colors, index)?.hex();
                copy_hex(out, &hex)?;
            }
        }
        Command::Save { name, color } => {
            let mut store = open_store(config)?;
            let palette = color.state().to_palette(name.unwrap_or_default());
            let saved = store.save(palette)?;
            writeln!(out, "Saved '{}' as {}", saved.name, saved.id)?;
        }
        Command::List { recent, all } => {
            let store = open_store(config)?;
            let palettes = if all {
                store.list()
            } else {
                store.recent(recent.unwrap_or(config.recent_limit))
            };
            if palettes.is_empty() {
                writeln!(out, "No saved palettes")?;
            }
            for palette in palettes {
                writeln!(out, "{}", format_palette_line(palette))?;
            }
        }
        Command::Show { id } => {
            let store = open_store(config)?;
            let palette = store.load(&id)?;
            writeln!(out, "{}", format_palette_line(palette))?;
            writeln!(out, "created {}", palette.created.to_rfc3339())?;
            for color in palette.hsl_colors() {
                writeln!(out, "  {}", format_swatch(&Swatch::from(color)))?;
            }
        }
        Command::Delete { id } => {
            let mut store = open_store(config)?;
            let removed = store.delete(&id)?;
            writeln!(out, "Deleted '{}' ({})", removed.name, removed.id)?;
        }
        Command::Export {
            name,
            id,
            out: dir,
            color,
        } => {
            let export = match id {
                Some(id) => {
                    let store = open_store(config)?;
                    PaletteExport::from_palette(store.load(&id)?)
                }
                None => color.state().export(name.as_deref()),
            };
            fs::create_dir_all(&dir)?;
            let path = dir.join(export.file_name());
            fs::write(&path, export.to_json()?)?;
            log::info!("Exported palette to {}", path.display());
            writeln!(out, "Exported {}", path.display())?;
        }
        Command::Copy(color) => {
            copy_hex(out, &color.state().base_hex())?;
        }
    }
    Ok(())
}

/// The `index`-th extracted color, counting from 1.
fn nth_color(colors: &[ExtractedColor], index: usize) -> Result<&ExtractedColor, AppError> {
    index
        .checked_sub(1)
        .and_then(|i| colors.get(i))
        .ok_or(AppError::NoSuchColor {
            index,
            count: colors.len(),
        })
}

fn copy_hex(out: &mut impl Write, hex: &str) -> io::Result<()> {
    if copy_text(hex) == CopyOutcome::Clipboard {
        writeln!(out, "Copied {}", hex)?;
    }
    Ok(())
}

fn write_state(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    writeln!(out, "{} from {}", state.harmony(), state.base_hex())?;
    for swatch in state.swatches() {
        writeln!(out, "  {}", format_swatch(&swatch))?;
    }

    let report = state.accessibility();
    writeln!(
        out,
        "contrast on white {}  AA {}  AAA {}",
        report.ratio_label(),
        pass_label(report.aa),
        pass_label(report.aaa)
    )
}

fn pass_label(pass: bool) -> &'static str {
    if pass { "pass" } else { "fail" }
}

fn format_swatch(swatch: &Swatch) -> String {
    let rgb = swatch.rgb;
    format!(
        "{}  rgb({}, {}, {})  hsl({})",
        swatch.hex, rgb.r, rgb.g, rgb.b, swatch.hsl
    )
}

fn format_extracted(color: &ExtractedColor) -> String {
    let rgb = color.rgb;
    format!(
        "{}  rgb({}, {}, {})  x{}",
        color.hex(),
        rgb.r,
        rgb.g,
        rgb.b,
        color.count
    )
}

fn format_palette_line(palette: &Palette) -> String {
    let hexes: Vec<&str> = palette.colors.iter().map(|c| c.hex.as_str()).collect();
    format!(
        "{}  {}  [{}]  {}",
        palette.id,
        palette.name,
        palette.harmony,
        hexes.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ColorArgs;
    use chromacraft_core::{HarmonyRule, Hsl, Rgb, PALETTES_KEY};
    use std::path::Path;

    fn test_config(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.to_path_buf(),
            ..AppConfig::default()
        }
    }

    fn color(base: Hsl, harmony: HarmonyRule) -> ColorArgs {
        ColorArgs {
            base: Some(base),
            harmony,
            temperature: 0.0,
        }
    }

    fn exec(config: &AppConfig, command: Command) -> Result<String, AppError> {
        let mut out = Vec::new();
        execute(config, command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_generate_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = exec(
            &test_config(dir.path()),
            Command::Generate(color(Hsl::new(0.0, 100.0, 50.0), HarmonyRule::Complementary)),
        )
        .unwrap();

        assert!(output.starts_with("complementary from #ff0000"));
        assert!(output.contains("#ff0000  rgb(255, 0, 0)  hsl(0°, 100%, 50%)"));
        assert!(output.contains("#00ffff"));
        assert!(output.contains("AA fail"));
    }

    #[test]
    fn test_save_list_show_delete() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let saved = exec(
            &config,
            Command::Save {
                name: Some("Ocean".to_string()),
                color: color(Hsl::new(200.0, 60.0, 40.0), HarmonyRule::Triadic),
            },
        )
        .unwrap();
        assert!(saved.starts_with("Saved 'Ocean' as "));
        assert!(dir.path().join(format!("{}.json", PALETTES_KEY)).exists());

        let id = open_store(&config).unwrap().list()[0].id.clone();

        let listed = exec(&config, Command::List { recent: None, all: false }).unwrap();
        assert!(listed.contains(&id));
        assert!(listed.contains("Ocean  [triadic]"));

        let shown = exec(&config, Command::Show { id: id.clone() }).unwrap();
        assert_eq!(shown.lines().filter(|l| l.starts_with("  #")).count(), 3);

        let deleted = exec(&config, Command::Delete { id: id.clone() }).unwrap();
        assert!(deleted.starts_with("Deleted 'Ocean'"));

        let listed = exec(&config, Command::List { recent: None, all: true }).unwrap();
        assert_eq!(listed.trim(), "No saved palettes");
    }

    #[test]
    fn test_missing_palette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let result = exec(&config, Command::Delete { id: "nope".to_string() });
        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound(_)))));

        let result = exec(&config, Command::Show { id: "nope".to_string() });
        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound(_)))));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let out_dir = dir.path().join("exports");

        exec(
            &config,
            Command::Export {
                name: Some("Sunset".to_string()),
                id: None,
                out: out_dir.clone(),
                color: color(Hsl::new(20.0, 90.0, 55.0), HarmonyRule::Analogous),
            },
        )
        .unwrap();

        let json = fs::read_to_string(out_dir.join("Sunset.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Sunset");
        assert_eq!(value["harmony"], "analogous");
        assert_eq!(value["colors"].as_array().unwrap().len(), 3);
        assert!(value["exportDate"].is_string());
    }

    #[test]
    fn test_extract_ignores_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        fs::write(&path, "hello").unwrap();

        let command = Command::Extract {
            image: path,
            copy: None,
        };
        let output = exec(&test_config(dir.path()), command).unwrap();
        assert!(output.contains("not an image"));
    }

    #[test]
    fn test_extract_prints_ranked_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let command = Command::Extract {
            image: path,
            copy: None,
        };
        let output = exec(&test_config(dir.path()), command).unwrap();
        assert_eq!(output.trim(), "#ff0000  rgb(255, 0, 0)  x25");
    }

    #[test]
    fn test_nth_color_counts_from_one() {
        let colors = [
            ExtractedColor {
                rgb: Rgb::new(255, 0, 0),
                count: 9,
            },
            ExtractedColor {
                rgb: Rgb::new(0, 0, 255),
                count: 4,
            },
        ];
        assert_eq!(nth_color(&colors, 1).unwrap().hex(), "#ff0000");
        assert_eq!(nth_color(&colors, 2).unwrap().hex(), "#0000ff");
        assert!(matches!(
            nth_color(&colors, 0),
            Err(AppError::NoSuchColor { index: 0, count: 2 })
        ));
        assert!(matches!(
            nth_color(&colors, 3),
            Err(AppError::NoSuchColor { index: 3, count: 2 })
        ));
    }

    #[test]
    fn test_extract_copy_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let command = Command::Extract {
            image: path,
            copy: Some(2),
        };
        let result = exec(&test_config(dir.path()), command);
        assert!(matches!(
            result,
            Err(AppError::NoSuchColor { index: 2, count: 1 })
        ));
    }

    #[test]
    fn test_export_saved_palette_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        exec(
            &config,
            Command::Save {
                name: Some("Harbor Blue".to_string()),
                color: color(Hsl::new(210.0, 50.0, 40.0), HarmonyRule::Tetradic),
            },
        )
        .unwrap();
        let id = open_store(&config).unwrap().list()[0].id.clone();

        let out_dir = dir.path().join("exports");
        exec(
            &config,
            Command::Export {
                name: None,
                id: Some(id),
                out: out_dir.clone(),
                color: color(Hsl::default(), HarmonyRule::Complementary),
            },
        )
        .unwrap();

        let json = fs::read_to_string(out_dir.join("Harbor Blue.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["harmony"], "tetradic");
        assert_eq!(value["colors"].as_array().unwrap().len(), 4);
        assert_eq!(value["colors"][0]["hex"], "#336699");
    }

    #[test]
    fn test_export_missing_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let result = exec(
            &config,
            Command::Export {
                name: None,
                id: Some("nope".to_string()),
                out: dir.path().to_path_buf(),
                color: color(Hsl::default(), HarmonyRule::Complementary),
            },
        );
        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound(_)))));
    }
}
