//! EXIF metadata — decode, serialize, and splice behind a capability trait.
//!
//! | Operation | Crate / mechanism |
//! |---|---|
//! | **Container read/write** | `img-parts` (JPEG APP1, PNG eXIf chunk) |
//! | **Tag decoding** | `kamadak-exif` over the raw TIFF payload |
//! | **Serialization** | verbatim raw payload carried in [`TagMap`] |
//!
//! The module is split into:
//! - **Codec**: [`ExifCodec`] trait + [`TagMap`]/[`TagEntry`] + [`CodecError`]
//! - **Production**: [`RustCodec`]

pub mod codec;
pub mod rust_codec;

pub use codec::{CodecError, ExifCodec, TagEntry, TagMap};
pub use rust_codec::RustCodec;
