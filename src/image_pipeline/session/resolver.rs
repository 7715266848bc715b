use std::path::{Path, PathBuf};

/// Picks the raster to show: an uploaded file wins over a listed one, and a
/// listed file is taken relative to `base_dir`. Returns `None` when nothing
/// is selected.
pub fn resolve_path(
    base_dir: Option<&Path>,
    selected: Option<&str>,
    uploaded: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(uploaded) = uploaded.filter(|p| !p.as_os_str().is_empty()) {
        return Some(uploaded.to_path_buf());
    }

    let selected = selected.filter(|s| !s.is_empty())?;
    Some(match base_dir {
        Some(base) => base.join(selected),
        None => PathBuf::from(selected),
    })
}
