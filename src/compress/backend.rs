//! Compression backend trait and shared types.
//!
//! The [`Compressor`] trait is the seam between the pipeline (which decides
//! budgets and orchestrates metadata) and the codec doing the pixel work. The
//! production implementation is
//! [`RustCompressor`](super::rust_backend::RustCompressor); tests substitute
//! the recording mock below.

use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("could not decode source image: {0}")]
    Decode(String),
    #[error("could not encode output: {0}")]
    Encode(String),
    #[error("compression worker died before producing a result")]
    WorkerLost,
}

/// Constraints for a single compression request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressParams {
    /// Target output ceiling in megabytes. Best-effort: the backend returns
    /// its smallest attempt even when the ceiling cannot be met.
    pub size_budget_mb: f64,
    /// Longest-edge ceiling in pixels; larger sources are downscaled.
    pub max_dimension_px: u32,
    /// Run the pixel work off the calling thread.
    pub allow_off_thread: bool,
}

/// Trait for compression backends.
///
/// One operation: take encoded source bytes and constraints, return encoded
/// output bytes. Failure means the input could not be processed at all — a
/// missed size budget is not a failure.
pub trait Compressor: Sync {
    fn compress(&self, source: &[u8], params: &CompressParams) -> Result<Bytes, CompressError>;
}
