//! Caller-owned session state: the current source, the level, and the most
//! recent result.
//!
//! The pipeline itself is a value-in, value-out function; whatever "current
//! result" a UI shell keeps is its own state. [`ResultSlot`] models that as a
//! single-slot register with explicit replace semantics: publishing a new
//! occupant drops the previous one exactly once, so anything tied to it (a
//! preview handle, a temp file) is released on replacement rather than
//! accumulating across runs. Overlapping runs are not serialized — whichever
//! completes last owns the slot.
//!
//! [`Session`] bundles the register with the selection rules: choosing a new
//! source discards the old one and clears the result, but the level sticks —
//! it belongs to the user, not to any particular image.

use crate::compress::Compressor;
use crate::metadata::ExifCodec;
use crate::pipeline::{self, CompressedResult, PipelineConfig, PipelineError, SourceImage};
use crate::settings::CompressionLevel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no image selected")]
    NoSource,
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Single-slot register for the most recent result of some repeated
/// operation. Replacing the occupant drops it, exactly once.
#[derive(Debug)]
pub struct ResultSlot<R> {
    current: Option<R>,
}

impl<R> Default for ResultSlot<R> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<R> ResultSlot<R> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Install `next`, releasing the previous occupant if any.
    pub fn publish(&mut self, next: R) -> &R {
        self.current.insert(next)
    }

    /// Release the occupant without installing a replacement.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&R> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// One user session: selection, level, and the latest result.
#[derive(Debug, Default)]
pub struct Session {
    source: Option<SourceImage>,
    level: CompressionLevel,
    result: ResultSlot<CompressedResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current source. The previous source and its result are
    /// discarded; the level is untouched.
    pub fn select(&mut self, source: SourceImage) {
        self.source = Some(source);
        self.result.clear();
    }

    pub fn set_level(&mut self, level: CompressionLevel) {
        self.level = level;
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn result(&self) -> Option<&CompressedResult> {
        self.result.current()
    }

    /// Compress the current source at the current level and publish the
    /// outcome into the result slot.
    pub fn compress_with(
        &mut self,
        compressor: &impl Compressor,
        codec: &impl ExifCodec,
    ) -> Result<&CompressedResult, SessionError> {
        let source = self.source.as_ref().ok_or(SessionError::NoSource)?;
        let result = pipeline::run_with(
            compressor,
            codec,
            source,
            &PipelineConfig::new(self.level),
        )?;
        Ok(self.result.publish(result))
    }
}
