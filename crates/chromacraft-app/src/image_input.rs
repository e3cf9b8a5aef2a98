//! Image loading for color extraction.
//!
//! Decodes an image file, shrinks it so its longest edge fits the extraction
//! policy and hands the RGBA pixels to the core.

use crate::app::AppError;
use chromacraft_core::{ExtractionConfig, PixelBuffer};
use image::imageops::FilterType;
use image::DynamicImage;
use std::fs;
use std::path::Path;

/// Whether the file's media type, guessed from its extension, is `image/*`.
pub fn is_image_path(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().starts_with("image/"))
        .unwrap_or(false)
}

/// Load pixels from an image file.
///
/// Files that are not images are ignored: `Ok(None)` with a warning.
pub fn load_pixels(
    path: &Path,
    config: &ExtractionConfig,
) -> Result<Option<PixelBuffer>, AppError> {
    if !is_image_path(path) {
        log::warn!("Ignoring {}: not an image", path.display());
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    decode_pixels(&bytes, config).map(Some)
}

/// Decode encoded image bytes (PNG, JPEG or WebP).
pub fn decode_pixels(bytes: &[u8], config: &ExtractionConfig) -> Result<PixelBuffer, AppError> {
    let image = image::load_from_memory(bytes)?;
    to_pixel_buffer(image, config)
}

/// Downscale to the extraction size and convert to RGBA.
pub fn to_pixel_buffer(
    image: DynamicImage,
    config: &ExtractionConfig,
) -> Result<PixelBuffer, AppError> {
    let (width, height) = (image.width(), image.height());
    let (target_w, target_h) = config.fit_dimensions(width, height);

    let image = if (target_w, target_h) != (width, height) {
        log::debug!("Downscaling {}x{} to {}x{}", width, height, target_w, target_h);
        image.resize_exact(target_w, target_h, FilterType::Triangle)
    } else {
        image
    };

    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(PixelBuffer::new(w, h, rgba.into_raw())?)
}
