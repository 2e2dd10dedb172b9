//! Budget-driven image compression.
//!
//! The algorithm is bounded: one downscale to the context's dimension
//! ceiling, then at most two JPEG encode passes. The second pass derives its
//! quality from how far the first pass overshot the byte budget.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use tracing::debug;

use inkpress_core::models::ImageContext;

use crate::error::ImageGateError;

/// Minimum quality factor the corrective pass may fall to.
const MIN_QUALITY: f32 = 0.1;

/// Result of a successful compression run.
#[derive(Debug, Clone)]
pub struct CompressionOutcome {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    /// Encode passes performed (1 or 2).
    pub passes: u32,
}

pub fn decode(data: &[u8]) -> Result<DynamicImage, ImageGateError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageGateError::Decode(e.to_string()))?;
    reader
        .decode()
        .map_err(|e| ImageGateError::Decode(e.to_string()))
}

/// Downscale so neither dimension exceeds the ceiling, preserving aspect
/// ratio. Images already within bounds are returned unchanged.
pub fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_width && height <= max_height {
        return img;
    }
    img.resize(max_width, max_height, FilterType::Lanczos3)
}

/// Encode as JPEG at a 0.0..=1.0 quality factor. Alpha is flattened since
/// JPEG has no alpha channel.
pub fn encode_jpeg(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, ImageGateError> {
    let quality = ((quality.clamp(0.0, 1.0) * 100.0).round() as u8).max(1);
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| ImageGateError::Encode(e.to_string()))?;
    Ok(out)
}

/// Quality factor for the corrective second pass, proportional to how far
/// the first pass overshot, floored at [`MIN_QUALITY`].
pub fn corrected_quality(initial: f32, target_bytes: usize, actual_bytes: usize) -> f32 {
    (initial * target_bytes as f32 / actual_bytes as f32).max(MIN_QUALITY)
}

/// Re-encode `data` so it fits the context's byte budget and dimension
/// ceiling. Callers are expected to have already handled the
/// under-budget pass-through case.
pub fn compress_to_budget(
    data: &[u8],
    context: ImageContext,
) -> Result<CompressionOutcome, ImageGateError> {
    let budget = context.max_size_bytes();
    let (max_width, max_height) = context.max_dimensions();

    let img = decode(data)?;
    let img = fit_within(img, max_width, max_height);
    let (width, height) = img.dimensions();

    let quality = context.initial_quality();
    let first = encode_jpeg(&img, quality)?;
    if first.len() <= budget {
        return Ok(CompressionOutcome {
            bytes: Bytes::from(first),
            width,
            height,
            passes: 1,
        });
    }

    let retry_quality = corrected_quality(quality, budget, first.len());
    debug!(
        first_pass_bytes = first.len(),
        budget_bytes = budget,
        retry_quality,
        "first encode pass over budget, retrying"
    );

    let second = encode_jpeg(&img, retry_quality)?;
    if second.len() <= budget {
        return Ok(CompressionOutcome {
            bytes: Bytes::from(second),
            width,
            height,
            passes: 2,
        });
    }

    Err(ImageGateError::BudgetExceeded {
        budget_kb: context.max_size_kb(),
        actual_bytes: second.len(),
        passes: 2,
    })
}
