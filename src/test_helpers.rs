//! Shared fixture builders for the pixpress test suite.
//!
//! Everything is built in memory: synthetic gradient images encoded as JPEG
//! or PNG, and a minimal handcrafted EXIF payload (little-endian TIFF with an
//! ImageDescription and an Orientation field) for round-trip tests.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage};
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// A small valid JPEG with the given dimensions.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut buf), 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// A small valid PNG with the given dimensions.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Minimal raw EXIF payload (TIFF structure, little-endian) carrying
/// ImageDescription = `description` and Orientation = 1.
///
/// Layout: 8-byte TIFF header, one IFD with two entries, description string
/// out-of-line at offset 38. `description` must be at least 4 bytes so the
/// string never fits inline.
pub fn exif_payload(description: &str) -> Vec<u8> {
    let desc = description.as_bytes();
    assert!(desc.len() >= 4, "description too short for fixture layout");
    let desc_count = (desc.len() + 1) as u32; // ASCII count includes the NUL
    let desc_offset: u32 = 38; // header (8) + IFD (2 + 2*12 + 4)

    let mut payload = Vec::new();
    // TIFF header
    payload.extend_from_slice(b"II");
    payload.extend_from_slice(&42u16.to_le_bytes());
    payload.extend_from_slice(&8u32.to_le_bytes());
    // IFD0: two entries
    payload.extend_from_slice(&2u16.to_le_bytes());
    // ImageDescription (0x010E), ASCII, out-of-line
    payload.extend_from_slice(&0x010Eu16.to_le_bytes());
    payload.extend_from_slice(&2u16.to_le_bytes());
    payload.extend_from_slice(&desc_count.to_le_bytes());
    payload.extend_from_slice(&desc_offset.to_le_bytes());
    // Orientation (0x0112), SHORT, inline value 1
    payload.extend_from_slice(&0x0112u16.to_le_bytes());
    payload.extend_from_slice(&3u16.to_le_bytes());
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
    // No further IFDs
    payload.extend_from_slice(&0u32.to_le_bytes());
    // Out-of-line description data
    payload.extend_from_slice(desc);
    payload.push(0);

    payload
}

/// A small valid JPEG carrying the [`exif_payload`] for `description`.
pub fn jpeg_with_exif(width: u32, height: u32, description: &str) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(jpeg_bytes(width, height))).unwrap();
    jpeg.set_exif(Some(Bytes::from(exif_payload(description))));
    jpeg.encoder().bytes().to_vec()
}
