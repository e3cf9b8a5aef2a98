//! Dominant color extraction from decoded image pixels.
//!
//! The extractor samples a fixed fraction of pixels, snaps each channel to a
//! coarse grid and counts how often every grid color occurs. Images are
//! expected to be downscaled by the caller first (see
//! [`ExtractionConfig::fit_dimensions`]) so the work stays bounded.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Default sampling step: every 4th pixel (16 bytes of RGBA).
pub const DEFAULT_SAMPLE_STEP: usize = 4;

/// Default quantization bucket size per channel.
pub const DEFAULT_BUCKET_SIZE: u8 = 16;

/// Default number of colors returned.
pub const DEFAULT_MAX_COLORS: usize = 5;

/// Default longest edge, in pixels, of the image handed to the extractor.
pub const DEFAULT_MAX_DIMENSION: u32 = 200;

/// Extraction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Tunable extraction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Sample one pixel out of every `sample_step`.
    pub sample_step: usize,
    /// Channel grid size used for quantization.
    pub bucket_size: u8,
    /// Maximum number of colors to return.
    pub max_colors: usize,
    /// Longest image edge the caller should downscale to.
    pub max_dimension: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sample_step: DEFAULT_SAMPLE_STEP,
            bucket_size: DEFAULT_BUCKET_SIZE,
            max_colors: DEFAULT_MAX_COLORS,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl ExtractionConfig {
    /// Target size for an image of `width`x`height` so that its longest edge
    /// fits `max_dimension`. Aspect ratio is preserved and small images are
    /// left alone.
    pub fn fit_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 {
            return (width, height);
        }

        let max = self.max_dimension.max(1) as f64;
        let scale = (max / width as f64).min(max / height as f64);
        if scale >= 1.0 {
            return (width, height);
        }

        let w = ((width as f64 * scale).round() as u32).clamp(1, self.max_dimension.max(1));
        let h = ((height as f64 * scale).round() as u32).clamp(1, self.max_dimension.max(1));
        (w, h)
    }

    fn quantize(&self, channel: u8) -> u8 {
        let bucket = self.bucket_size.max(1) as f64;
        ((channel as f64 / bucket).round() * bucket).min(255.0) as u8
    }
}

/// Decoded RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap RGBA bytes, checking that the length matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ExtractError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ExtractError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer filled with one opaque color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let pixels = width as usize * height as usize;
        let data = [color.r, color.g, color.b, 255].repeat(pixels);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }
}

/// A quantized color and how many sampled pixels fell into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedColor {
    pub rgb: Rgb,
    pub count: usize,
}

impl ExtractedColor {
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// Rank the most frequent quantized colors in `pixels`.
///
/// Returns at most `config.max_colors` entries, most frequent first. Colors
/// with equal counts keep the order in which they were first seen.
pub fn extract_colors(pixels: &PixelBuffer, config: &ExtractionConfig) -> Vec<ExtractedColor> {
    let step = config.sample_step.max(1);

    let mut index: HashMap<Rgb, usize> = HashMap::new();
    let mut histogram: Vec<ExtractedColor> = Vec::new();
    let mut sampled = 0usize;

    for px in pixels.data.chunks_exact(4).step_by(step) {
        sampled += 1;
        let rgb = Rgb::new(
            config.quantize(px[0]),
            config.quantize(px[1]),
            config.quantize(px[2]),
        );
        match index.get(&rgb) {
            Some(&i) => histogram[i].count += 1,
            None => {
                index.insert(rgb, histogram.len());
                histogram.push(ExtractedColor { rgb, count: 1 });
            }
        }
    }

    // sort_by is stable, so first-seen order breaks ties
    histogram.sort_by(|a, b| b.count.cmp(&a.count));
    histogram.truncate(config.max_colors);

    log::debug!(
        "Extracted {} colors from {} sampled pixels ({}x{})",
        histogram.len(),
        sampled,
        pixels.width,
        pixels.height
    );

    histogram
}

/// [`extract_colors`] with the default policy.
pub fn dominant_colors(pixels: &PixelBuffer) -> Vec<ExtractedColor> {
    extract_colors(pixels, &ExtractionConfig::default())
}
