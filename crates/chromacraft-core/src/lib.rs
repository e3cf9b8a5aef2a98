//! ChromaCraft Core Library
//!
//! Platform-agnostic color logic for the ChromaCraft palette generator:
//! color space conversions, harmony rules, WCAG contrast, dominant-color
//! extraction, and palette persistence.

pub mod color;
pub mod contrast;
pub mod extract;
pub mod harmony;
pub mod palette;
pub mod state;
pub mod storage;
pub mod store;

pub use color::{
    hex_to_rgb, hsl_to_hex, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, Hsl, ParseHexError, Rgb,
};
pub use contrast::{contrast_ratio, relative_luminance, AccessibilityReport};
pub use extract::{
    dominant_colors, extract_colors, ExtractError, ExtractedColor, ExtractionConfig, PixelBuffer,
};
pub use harmony::{
    generate, generate_named, generate_with_temperature, shift_temperature, HarmonyRule,
    InvalidHarmonyError,
};
pub use palette::{ExportColor, Palette, PaletteColor, PaletteExport};
pub use state::{AppState, Swatch};
pub use storage::{MemoryStorage, PlatformStorage, Storage, StorageError, StorageResult};
pub use store::{PaletteStore, StoreError, StoreResult, DEFAULT_RECENT_LIMIT, PALETTES_KEY};
