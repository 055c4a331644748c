//! Expand CLI arguments into the list of images to compress.
//!
//! Arguments may be files or directories. Files must exist and carry a
//! supported extension; directories are walked recursively and anything with
//! a supported extension is picked up, sorted by path so runs are
//! reproducible. Non-image files inside walked directories are skipped
//! silently — only explicitly named files are worth an error.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions whose decoders are compiled in and known to work.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported file type: {0}")]
    Unsupported(PathBuf),
    #[error("no images found in: {0}")]
    EmptyDirectory(PathBuf),
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Expand files and directories into a sorted, deduplicated image list.
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut images = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(InputError::NotFound(path.clone()));
        }
        if path.is_dir() {
            let before = images.len();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    InputError::Io(e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::other("walk entry without IO cause")
                    }))
                })?;
                if entry.file_type().is_file() && is_supported(entry.path()) {
                    images.push(entry.path().to_path_buf());
                }
            }
            if images.len() == before {
                return Err(InputError::EmptyDirectory(path.clone()));
            }
        } else if is_supported(path) {
            images.push(path.clone());
        } else {
            return Err(InputError::Unsupported(path.clone()));
        }
    }

    images.sort();
    images.dedup();
    Ok(images)
}
