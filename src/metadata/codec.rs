//! EXIF codec trait and shared types.
//!
//! The [`ExifCodec`] trait defines the three operations the pipeline needs:
//! decode an image's EXIF block into a tag map, serialize a tag map back to
//! bytes, and splice a serialized block into an encoded image. The production
//! implementation is [`RustCodec`](super::rust_codec::RustCodec); tests
//! substitute the configurable mock below.

use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The image carries no EXIF block at all. Not an error to the pipeline —
    /// it degrades to "no metadata".
    #[error("no EXIF metadata present")]
    Absent,
    #[error("EXIF decode failed: {0}")]
    Decode(String),
    #[error("container not understood: {0}")]
    Container(String),
    #[error("EXIF splice failed: {0}")]
    Splice(String),
}

/// One decoded EXIF field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// IFD the field lives in (e.g. primary vs thumbnail).
    pub ifd: String,
    pub tag: String,
    pub value: String,
}

/// Decoded EXIF metadata for one source image.
///
/// Holds the human-readable field entries alongside the raw TIFF payload they
/// were decoded from. The raw payload is what gets spliced back after
/// compression, so preservation is lossless even for fields the decoder has
/// no names for. Recreated whole per extraction — never merged with a
/// previous map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagMap {
    entries: Vec<TagEntry>,
    raw: Bytes,
}

impl TagMap {
    pub fn from_parts(entries: Vec<TagEntry>, raw: Bytes) -> Self {
        Self { entries, raw }
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Raw TIFF payload the entries were decoded from.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Trait for EXIF codec backends.
///
/// `decode` failure is soft (the pipeline proceeds without metadata);
/// `splice` failure is soft (the pipeline falls back to the bare compressed
/// bytes); `encode` is infallible by contract — a tag map that decoded is
/// always serializable.
pub trait ExifCodec: Sync {
    /// Decode the EXIF block of an encoded image into a tag map.
    fn decode(&self, image: &[u8]) -> Result<TagMap, CodecError>;

    /// Serialize a tag map back to an EXIF byte block.
    fn encode(&self, tags: &TagMap) -> Bytes;

    /// Embed a serialized EXIF block into an encoded image, producing a new
    /// byte stream.
    fn splice(&self, exif: Bytes, image: &[u8]) -> Result<Bytes, CodecError>;
}
