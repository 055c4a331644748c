//! Output filename derivation.
//!
//! Compressed files are offered back under the source's own name with a
//! prefix: `photo.jpg` → `compressed-photo.jpg`. The extension follows the
//! actual output container — a WebP source re-encoded to JPEG becomes
//! `compressed-photo.jpg`, while a JPEG source keeps its extension verbatim
//! (`.JPG` stays `.JPG`).

use image::ImageFormat;

/// Derive the output filename for a compressed image.
///
/// `container` is the format of the produced bytes (sniff with
/// [`image::guess_format`]). The original extension is kept when it already
/// names that container; otherwise it is replaced with the container's
/// canonical extension.
pub fn output_filename(original: &str, prefix: &str, container: ImageFormat) -> String {
    let (stem, ext) = split_extension(original);

    let keep_original_ext = ext.is_some_and(|e| {
        ImageFormat::from_extension(e.to_ascii_lowercase()).is_some_and(|f| f == container)
    });

    if keep_original_ext {
        format!("{prefix}{original}")
    } else {
        format!("{prefix}{stem}.{}", canonical_extension(container))
    }
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        // A leading dot is a hidden file, not an extension.
        Some(pos) if pos > 0 => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

fn canonical_extension(container: ImageFormat) -> &'static str {
    match container {
        ImageFormat::Png => "png",
        _ => "jpg",
    }
}
