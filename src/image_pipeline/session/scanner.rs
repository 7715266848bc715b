use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::image_pipeline::common::error::{PreviewError, Result};

const TIFF_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// True for paths with a `.tif` or `.tiff` extension, in any case.
pub fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TIFF_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
}

/// Recursively lists TIFF files under `root`, relative to it and sorted.
///
/// Entries that cannot be read are skipped with a warning.
pub fn scan_directory(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(PreviewError::InputReadError(format!(
            "{}: not a directory",
            root.display()
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_tiff(entry.path()))
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();

    debug!("Found {} TIFF file(s) under {}", files.len(), root.display());
    Ok(files)
}
