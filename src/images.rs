//! Inline PNG attachments picked up from the `images/` directory.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{info, warn};

use crate::archive::move_with_unique_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub source_path: PathBuf,
    /// `data:image/png;base64,...`
    pub data_url: String,
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

pub fn png_data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

/// Encode every PNG in `dir`, sorted by file name. Nothing here is fatal:
/// a missing directory yields no images and unreadable files are skipped.
pub fn load_images(dir: &Path) -> Vec<ImageAttachment> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            info!("No images directory at {}, sending text only", dir.display());
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_png(path))
        .collect();
    paths.sort();

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        match fs::read(&path) {
            Ok(bytes) => images.push(ImageAttachment {
                data_url: png_data_url(&bytes),
                source_path: path,
            }),
            Err(e) => warn!("Skipping image {}: {}", path.display(), e),
        }
    }

    if images.is_empty() {
        info!("No PNG images found in {}", dir.display());
    } else {
        info!("Attaching {} image(s)", images.len());
    }
    images
}

/// Move consumed images into `archive_dir`. Failures are per-image warnings.
pub fn archive_images(images: &[ImageAttachment], archive_dir: &Path) {
    if images.is_empty() {
        return;
    }
    if let Err(e) = fs::create_dir_all(archive_dir) {
        warn!("Could not create {}: {}", archive_dir.display(), e);
        return;
    }
    for image in images {
        match move_with_unique_name(&image.source_path, archive_dir) {
            Ok(dest) => info!("Archived {} to {}", image.source_path.display(), dest.display()),
            Err(e) => warn!("Failed to archive {}: {}", image.source_path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_extension_is_case_insensitive() {
        assert!(is_png(Path::new("shot.PNG")));
        assert!(is_png(Path::new("shot.png")));
        assert!(!is_png(Path::new("shot.jpg")));
        assert!(!is_png(Path::new("png")));
    }

    #[test]
    fn data_url_is_base64() {
        assert_eq!(png_data_url(b"abc"), "data:image/png;base64,YWJj");
    }
}
