//! Source image discovery, decoding and canvas export

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{MosaicError, Result, WithContext};

/// Whether `path` has one of the accepted image extensions
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
}

/// List image files directly inside `directory`, sorted by path
///
/// Subdirectories and files with other extensions are skipped.
///
/// # Errors
///
/// Returns a file system error if the directory cannot be read
pub fn collect_image_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).with_operation(directory, "read directory")?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_operation(directory, "read directory entry")?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decode an image file into 8-bit RGB
///
/// # Errors
///
/// Returns [`MosaicError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_path(path)?;
    Ok(image.to_rgb8())
}

/// Save a canvas, creating missing parent directories
///
/// The format follows the extension of `output_path`.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_canvas(canvas: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
