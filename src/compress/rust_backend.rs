//! Pure Rust compression backend on the `image` crate.
//!
//! ## Strategy
//!
//! 1. Decode the source (JPEG, PNG, WebP — whatever the compiled decoders
//!    accept).
//! 2. Downscale with Lanczos3 so the longest edge fits the dimension ceiling.
//! 3. Re-encode stepping toward the byte budget:
//!    - **JPEG output** (JPEG/WebP and any other non-PNG source): quality
//!      90 → 10 in steps of 10, then scale 1.0 → 0.1 in steps of 0.1.
//!    - **PNG output** (PNG source stays PNG): maximum compression, scale
//!      stepping only — PNG has no quality knob.
//!
//! The loop is best-effort: when it bottoms out above the budget it returns
//! the smallest attempt and logs, rather than failing the run.

use super::backend::{CompressError, CompressParams, Compressor};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use std::io::Cursor;

use crate::budget::budget_bytes;

/// Production backend. Stateless; safe to share across threads.
pub struct RustCompressor;

impl RustCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for RustCompressor {
    fn compress(&self, source: &[u8], params: &CompressParams) -> Result<Bytes, CompressError> {
        if params.allow_off_thread {
            // Hand the pixel work to the rayon pool so the calling thread
            // only waits. The scope blocks until the spawned task finishes.
            let mut result = None;
            rayon::scope(|s| {
                s.spawn(|_| result = Some(compress_inner(source, params)));
            });
            result.unwrap_or(Err(CompressError::WorkerLost))
        } else {
            compress_inner(source, params)
        }
    }
}

fn compress_inner(source: &[u8], params: &CompressParams) -> Result<Bytes, CompressError> {
    let format = image::guess_format(source)
        .map_err(|e| CompressError::Decode(format!("unrecognized container: {e}")))?;
    let img = image::load_from_memory(source).map_err(|e| CompressError::Decode(e.to_string()))?;

    let img = fit_within(img, params.max_dimension_px);
    let budget = budget_bytes(params.size_budget_mb);

    let out = match format {
        ImageFormat::Png => png_under_budget(&img, budget)?,
        _ => jpeg_under_budget(&img, budget)?,
    };

    if out.len() as u64 > budget {
        tracing::debug!(
            budget_bytes = budget,
            actual_bytes = out.len(),
            "size budget not met at minimum quality and scale; returning best effort"
        );
    }
    Ok(Bytes::from(out))
}

/// Downscale so the longest edge fits `max_dim`, preserving aspect ratio.
/// Images already within the ceiling pass through untouched.
fn fit_within(img: DynamicImage, max_dim: u32) -> DynamicImage {
    if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        img
    }
}

fn scaled(img: &DynamicImage, scale: f32) -> DynamicImage {
    if scale >= 1.0 {
        return img.clone();
    }
    let w = ((img.width() as f32 * scale) as u32).max(1);
    let h = ((img.height() as f32 * scale) as u32).max(1);
    img.resize(w, h, FilterType::Lanczos3)
}

fn jpeg_under_budget(img: &DynamicImage, budget: u64) -> Result<Vec<u8>, CompressError> {
    let mut quality: u8 = 90;
    let mut scale: f32 = 1.0;

    loop {
        // JPEG carries no alpha; convert before encoding.
        let rgb = scaled(img, scale).to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality)
            .write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| CompressError::Encode(e.to_string()))?;

        if buf.len() as u64 <= budget || (quality <= 10 && scale <= 0.1) {
            return Ok(buf);
        }

        if quality > 10 {
            quality -= 10;
        } else {
            scale -= 0.1;
        }
    }
}

fn png_under_budget(img: &DynamicImage, budget: u64) -> Result<Vec<u8>, CompressError> {
    let mut scale: f32 = 1.0;

    loop {
        let frame = scaled(img, scale);
        let mut buf = Vec::new();
        let encoder = PngEncoder::new_with_quality(
            Cursor::new(&mut buf),
            CompressionType::Best,
            PngFilter::Adaptive,
        );
        frame
            .write_with_encoder(encoder)
            .map_err(|e| CompressError::Encode(e.to_string()))?;

        if buf.len() as u64 <= budget || scale <= 0.1 {
            return Ok(buf);
        }

        scale -= 0.1;
    }
}
