//! Image preparation helpers for building input files.
//!
//! Thin wrappers over the `image` crate: decode from disk (PNG/JPEG/BMP/GIF),
//! re-encode or resample, and write back to disk.

use std::path::Path;

use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};

use crate::error::{PerceptronError, Result};

/// Decodes `input` and re-encodes it as `format` at `output`.
pub fn convert_format(input: impl AsRef<Path>, output: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
    let img = image::open(input)?;
    img.save_with_format(output, format)?;
    Ok(())
}

/// Resamples `input` to exactly `width × height` pixels (nearest neighbour).
///
/// The output format follows the extension of `output`.
pub fn resize_exact(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PerceptronError::InvalidConfig(format!(
            "cannot resize to {width}x{height}"
        )));
    }
    let img = image::open(input)?;
    let resized = img.resize_exact(width, height, FilterType::Nearest);
    resized.save(output)?;
    Ok(())
}

/// Scales both sides of `input` by `factor` (0.5 halves, 2.0 doubles),
/// truncating to whole pixels.
pub fn resize_by(input: impl AsRef<Path>, output: impl AsRef<Path>, factor: f64) -> Result<()> {
    let img = image::open(input.as_ref())?;
    let (w, h) = img.dimensions();
    let (width, height) = scaled(w, h, factor)?;
    let resized = img.resize_exact(width, height, FilterType::Nearest);
    resized.save(output)?;
    Ok(())
}

fn scaled(width: u32, height: u32, factor: f64) -> Result<(u32, u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PerceptronError::InvalidConfig(format!(
            "scale factor must be positive, got {factor}"
        )));
    }
    let w = (width as f64 * factor) as u32;
    let h = (height as f64 * factor) as u32;
    if w == 0 || h == 0 {
        return Err(PerceptronError::InvalidConfig(format!(
            "scaling {width}x{height} by {factor} leaves no pixels"
        )));
    }
    Ok((w, h))
}
