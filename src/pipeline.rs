//! The compression pipeline.
//!
//! One run takes a source image and a level, and produces compressed bytes
//! with the source's EXIF metadata carried over when possible:
//!
//! ```text
//! level ──► size budget ──► compress ──► reinsert EXIF ──► CompressedResult
//!                │               │              │
//!                │               │              └─ failure swallowed: fall
//!                │               │                 back to bare compressed
//!                │               └─ failure fatal: PipelineError
//!                └─ pure math, no failure
//! ```
//!
//! The asymmetry is deliberate: losing metadata is acceptable degradation,
//! losing the compression result is not. Extraction and reinsertion failures
//! are logged and absorbed; only a compression failure crosses the pipeline
//! boundary. Runs are one-shot — no cancellation, no retry, no progress.

use crate::budget;
use crate::compress::{
    CompressError, CompressParams, Compressor, MAX_DIMENSION_PX, RustCompressor,
};
use crate::metadata::{CodecError, ExifCodec, RustCodec, TagMap};
use crate::settings::CompressionLevel;
use bytes::Bytes;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("compression failed: {0}")]
    CompressionFailed(#[from] CompressError),
}

/// An image as selected by the user: bytes plus the name they knew it by.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SourceImage {
    filename: String,
    bytes: Bytes,
}

impl SourceImage {
    pub fn new(filename: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = Bytes::from(std::fs::read(path)?);
        Ok(Self { filename, bytes })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// What happened to the source's metadata on the way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataStatus {
    /// EXIF extracted and spliced into the output.
    Preserved,
    /// EXIF extracted but reinsertion failed; output carries none.
    Dropped,
    /// Source had no usable EXIF (or extraction was disabled).
    Absent,
}

impl std::fmt::Display for MetadataStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MetadataStatus::Preserved => "preserved",
            MetadataStatus::Dropped => "dropped",
            MetadataStatus::Absent => "none",
        })
    }
}

/// Output of one pipeline run. Superseded, never mutated.
#[derive(Debug, Clone)]
pub struct CompressedResult {
    bytes: Bytes,
    size: u64,
    metadata: MetadataStatus,
}

impl CompressedResult {
    fn new(bytes: Bytes, metadata: MetadataStatus) -> Self {
        let size = bytes.len() as u64;
        Self {
            bytes,
            size,
            metadata,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn metadata(&self) -> MetadataStatus {
        self.metadata
    }
}

/// Per-run knobs beyond the level itself.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub level: CompressionLevel,
    /// When false, extraction is skipped entirely and the output carries no
    /// metadata regardless of the source.
    pub keep_metadata: bool,
}

impl PipelineConfig {
    pub fn new(level: CompressionLevel) -> Self {
        Self {
            level,
            keep_metadata: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(CompressionLevel::default())
    }
}

/// Run the pipeline with the production backends.
pub fn run(
    source: &SourceImage,
    level: CompressionLevel,
) -> Result<CompressedResult, PipelineError> {
    run_with(
        &RustCompressor::new(),
        &RustCodec::new(),
        source,
        &PipelineConfig::new(level),
    )
}

/// Run the pipeline with specific backends (allows testing with mocks).
pub fn run_with(
    compressor: &impl Compressor,
    codec: &impl ExifCodec,
    source: &SourceImage,
    config: &PipelineConfig,
) -> Result<CompressedResult, PipelineError> {
    let size_budget_mb = budget::size_budget_mb(source.size(), config.level.percent());

    let tags = if config.keep_metadata {
        extract(codec, source)
    } else {
        None
    };

    let compressed = compressor.compress(
        source.bytes(),
        &CompressParams {
            size_budget_mb,
            max_dimension_px: MAX_DIMENSION_PX,
            allow_off_thread: true,
        },
    )?;

    let (bytes, metadata) = match tags {
        Some(tags) => match codec.splice(codec.encode(&tags), &compressed) {
            Ok(spliced) => (spliced, MetadataStatus::Preserved),
            Err(err) => {
                tracing::warn!(
                    source = %source.filename(),
                    error = %err,
                    "metadata reinsertion failed; keeping compressed bytes without it"
                );
                (compressed, MetadataStatus::Dropped)
            }
        },
        None => (compressed, MetadataStatus::Absent),
    };

    Ok(CompressedResult::new(bytes, metadata))
}

/// Best-effort extraction: any failure degrades to "no metadata".
fn extract(codec: &impl ExifCodec, source: &SourceImage) -> Option<TagMap> {
    match codec.decode(source.bytes()) {
        Ok(tags) if !tags.is_empty() => Some(tags),
        Ok(_) => None,
        Err(CodecError::Absent) => None,
        Err(err) => {
            tracing::debug!(
                source = %source.filename(),
                error = %err,
                "EXIF extraction failed; continuing without metadata"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::backend::tests::MockCompressor;
    use crate::metadata::codec::tests::{MockCodec, sample_tags};
    use crate::test_helpers::{jpeg_bytes, jpeg_with_exif};

    fn source_of_len(len: usize) -> SourceImage {
        SourceImage::new("photo.jpg", Bytes::from(vec![0u8; len]))
    }

    #[test]
    fn budget_and_policy_reach_the_compressor() {
        let compressor = MockCompressor::returning(b"squeezed");
        let codec = MockCodec::absent();
        let source = source_of_len(2 * 1024 * 1024);

        run_with(
            &compressor,
            &codec,
            &source,
            &PipelineConfig::new(CompressionLevel::new(50)),
        )
        .unwrap();

        let calls = compressor.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert!((calls[0].size_budget_mb - 1.0).abs() < 1e-9);
        assert_eq!(calls[0].max_dimension_px, 1280);
        assert!(calls[0].allow_off_thread);
    }

    #[test]
    fn absent_metadata_passes_compressed_bytes_through() {
        let compressor = MockCompressor::returning(b"squeezed");
        let codec = MockCodec::absent();
        let source = source_of_len(1024);

        let result = run_with(&compressor, &codec, &source, &PipelineConfig::default()).unwrap();

        assert_eq!(result.bytes(), b"squeezed");
        assert_eq!(result.size(), 8);
        assert_eq!(result.metadata(), MetadataStatus::Absent);
    }

    #[test]
    fn present_metadata_is_spliced_into_output() {
        let compressor = MockCompressor::returning(b"squeezed");
        let codec = MockCodec::with_tags(sample_tags());
        let source = source_of_len(1024);

        let result = run_with(&compressor, &codec, &source, &PipelineConfig::default()).unwrap();

        // Mock splice prepends the raw block.
        assert_eq!(result.bytes(), b"raw-tiff-payloadsqueezed");
        assert_eq!(result.metadata(), MetadataStatus::Preserved);
    }

    #[test]
    fn reinsertion_failure_falls_back_to_compressed_bytes() {
        let compressor = MockCompressor::returning(b"squeezed");
        let codec = MockCodec::failing_splice(sample_tags());
        let source = source_of_len(1024);

        let result = run_with(&compressor, &codec, &source, &PipelineConfig::default()).unwrap();

        assert_eq!(result.bytes(), b"squeezed");
        assert_eq!(result.metadata(), MetadataStatus::Dropped);
    }

    #[test]
    fn reinsertion_failure_is_deterministic_across_runs() {
        let compressor = MockCompressor::returning(b"squeezed");
        let codec = MockCodec::failing_splice(sample_tags());
        let source = source_of_len(1024);

        let first = run_with(&compressor, &codec, &source, &PipelineConfig::default()).unwrap();
        let second = run_with(&compressor, &codec, &source, &PipelineConfig::default()).unwrap();

        assert_eq!(first.bytes(), second.bytes());
    }

    #[test]
    fn compression_failure_is_fatal() {
        let compressor = MockCompressor::failing();
        let codec = MockCodec::with_tags(sample_tags());
        let source = source_of_len(1024);

        let result = run_with(&compressor, &codec, &source, &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::CompressionFailed(_))));
    }

    #[test]
    fn keep_metadata_false_skips_extraction() {
        let compressor = MockCompressor::returning(b"squeezed");
        let codec = MockCodec::with_tags(sample_tags());
        let source = source_of_len(1024);

        let config = PipelineConfig {
            keep_metadata: false,
            ..PipelineConfig::default()
        };
        let result = run_with(&compressor, &codec, &source, &config).unwrap();

        assert_eq!(result.bytes(), b"squeezed");
        assert_eq!(result.metadata(), MetadataStatus::Absent);
    }

    // =========================================================================
    // End-to-end with the production backends
    // =========================================================================

    #[test]
    fn round_trip_preserves_the_tag_map() {
        let codec = RustCodec::new();
        let source = SourceImage::new(
            "shore.jpg",
            Bytes::from(jpeg_with_exif(320, 240, "holiday shoreline")),
        );
        let original_tags = codec.decode(source.bytes()).unwrap();

        let result = run(&source, CompressionLevel::default()).unwrap();

        assert_eq!(result.metadata(), MetadataStatus::Preserved);
        let reread = codec.decode(result.bytes()).unwrap();
        assert_eq!(reread.entries(), original_tags.entries());
    }

    #[test]
    fn source_without_exif_yields_raw_compressor_output() {
        let source = SourceImage::new("bare.jpg", Bytes::from(jpeg_bytes(320, 240)));

        let result = run(&source, CompressionLevel::default()).unwrap();
        assert_eq!(result.metadata(), MetadataStatus::Absent);

        // Deterministic compressor: the pipeline added nothing on top.
        let direct = RustCompressor::new()
            .compress(
                source.bytes(),
                &CompressParams {
                    size_budget_mb: budget::size_budget_mb(source.size(), 90),
                    max_dimension_px: MAX_DIMENSION_PX,
                    allow_off_thread: false,
                },
            )
            .unwrap();
        assert_eq!(result.bytes(), &direct[..]);
    }

    #[test]
    fn source_image_accessors() {
        let source = SourceImage::new("a.jpg", Bytes::from_static(b"abcd"));
        assert_eq!(source.filename(), "a.jpg");
        assert_eq!(source.size(), 4);
        assert_eq!(source.bytes(), b"abcd");
    }
}
