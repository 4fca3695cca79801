//! Site photo discovery.

use std::fs;
use std::path::{Path, PathBuf};

use deckorator_core::submission::is_photo;
use deckorator_types::error::ArtifactError;

/// Photo files directly inside `dir`, sorted by path.
pub fn find_photos(dir: &Path) -> Result<Vec<PathBuf>, ArtifactError> {
    let entries = fs::read_dir(dir).map_err(|e| ArtifactError::io(dir, e))?;
    let mut photos = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ArtifactError::io(dir, e))?;
        let path = entry.path();
        if is_photo(&path) && path.is_file() {
            photos.push(path);
        }
    }
    photos.sort();
    Ok(photos)
}
