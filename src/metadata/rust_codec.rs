//! Production EXIF codec: `img-parts` containers + `kamadak-exif` decoding.
//!
//! JPEG carries EXIF in an APP1 segment, PNG in an eXIf chunk; `img-parts`
//! reads and writes both and hands us the raw TIFF payload in between. Tag
//! decoding is `kamadak-exif` over that payload. Serialization preserves the
//! payload verbatim (see [`TagMap`](super::codec::TagMap)) — nothing is
//! re-encoded, so unknown tags and maker notes survive the round trip.

use super::codec::{CodecError, ExifCodec, TagEntry, TagMap};
use bytes::Bytes;
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;
use img_parts::png::Png;

/// Production codec. Stateless; safe to share across threads.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ExifCodec for RustCodec {
    fn decode(&self, image: &[u8]) -> Result<TagMap, CodecError> {
        let raw = extract_raw_exif(image)?;
        let parsed = exif::Reader::new()
            .read_raw(raw.to_vec())
            .map_err(|e| match e {
                exif::Error::NotFound(_) | exif::Error::BlankValue(_) => CodecError::Absent,
                other => CodecError::Decode(other.to_string()),
            })?;

        let entries = parsed
            .fields()
            .map(|field| TagEntry {
                ifd: field.ifd_num.to_string(),
                tag: field.tag.to_string(),
                value: field.display_value().to_string(),
            })
            .collect();

        Ok(TagMap::from_parts(entries, raw))
    }

    fn encode(&self, tags: &TagMap) -> Bytes {
        tags.raw().clone()
    }

    fn splice(&self, exif: Bytes, image: &[u8]) -> Result<Bytes, CodecError> {
        if let Ok(mut jpeg) = Jpeg::from_bytes(Bytes::copy_from_slice(image)) {
            jpeg.set_exif(Some(exif));
            return Ok(jpeg.encoder().bytes());
        }
        if let Ok(mut png) = Png::from_bytes(Bytes::copy_from_slice(image)) {
            png.set_exif(Some(exif));
            return Ok(png.encoder().bytes());
        }
        Err(CodecError::Splice(
            "output container cannot carry EXIF".into(),
        ))
    }
}

/// Pull the raw TIFF payload out of a JPEG or PNG container.
fn extract_raw_exif(image: &[u8]) -> Result<Bytes, CodecError> {
    if let Ok(jpeg) = Jpeg::from_bytes(Bytes::copy_from_slice(image)) {
        return jpeg.exif().ok_or(CodecError::Absent);
    }
    if let Ok(png) = Png::from_bytes(Bytes::copy_from_slice(image)) {
        return png.exif().ok_or(CodecError::Absent);
    }
    Err(CodecError::Container("not a JPEG or PNG container".into()))
}
