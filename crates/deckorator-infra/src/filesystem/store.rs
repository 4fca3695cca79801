//! Persist a new artifact, archiving the one it supersedes.
//!
//! Order of operations:
//! 1. Write the document to a temporary file in the target directory
//! 2. Rename the merge basis to `archived_<name>` (if one was used)
//! 3. Persist the temporary file under the fresh name, never clobbering
//!
//! If step 3 fails the archive rename is undone, so the basis stays the
//! latest artifact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use deckorator_types::artifact::{LocatedArtifact, SavedArtifact, archived_file_name};
use deckorator_types::error::ArtifactError;
use tempfile::NamedTempFile;

pub fn save_artifact(
    dir: &Path,
    file_name: &str,
    document: &str,
    basis: Option<&LocatedArtifact>,
) -> Result<SavedArtifact, ArtifactError> {
    let target = dir.join(file_name);
    if target.exists() {
        return Err(ArtifactError::AlreadyExists(target));
    }

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| ArtifactError::io(dir, e))?;
    staged
        .write_all(document.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| ArtifactError::io(staged.path(), e))?;

    let archived = basis.map(archive).transpose()?;

    if let Err(err) = staged.persist_noclobber(&target) {
        if let (Some(archived), Some(basis)) = (&archived, basis) {
            match fs::rename(archived, &basis.path) {
                Ok(()) => tracing::info!(file = %basis.file_name, "restored archived artifact"),
                Err(e) => tracing::error!(
                    "failed to restore {} to {}: {e}",
                    archived.display(),
                    basis.path.display()
                ),
            }
        }
        return Err(match err.error.kind() {
            std::io::ErrorKind::AlreadyExists => ArtifactError::AlreadyExists(target),
            _ => ArtifactError::io(&target, err.error),
        });
    }

    tracing::info!(path = %target.display(), "saved artifact");
    Ok(SavedArtifact {
        path: target,
        archived,
    })
}

fn archive(basis: &LocatedArtifact) -> Result<PathBuf, ArtifactError> {
    let archived = basis
        .path
        .with_file_name(archived_file_name(&basis.file_name));
    if archived.exists() {
        return Err(ArtifactError::AlreadyExists(archived));
    }
    fs::rename(&basis.path, &archived).map_err(|e| ArtifactError::io(&basis.path, e))?;
    tracing::info!(from = %basis.file_name, to = %archived.display(), "archived prior artifact");
    Ok(archived)
}
