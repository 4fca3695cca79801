//! Find the most recent artifact in a directory.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use deckorator_types::artifact::{Complexity, LocatedArtifact};
use deckorator_types::error::ArtifactError;
use glob::Pattern;

pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, ArtifactError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| ArtifactError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Creation time, or modification time where the platform has none.
fn created_at(metadata: &fs::Metadata) -> std::io::Result<SystemTime> {
    metadata.created().or_else(|_| metadata.modified())
}

/// Ordering by creation time, then file name.
fn supersedes(created: SystemTime, file_name: &str, current: &LocatedArtifact) -> bool {
    (created, file_name) > (current.created, current.file_name.as_str())
}

/// The regular file in `dir` matching any of `patterns` with the latest
/// creation time. Ties go to the lexicographically last file name.
pub fn locate_latest(dir: &Path, patterns: &[Pattern]) -> Result<Option<LocatedArtifact>, ArtifactError> {
    let entries = fs::read_dir(dir).map_err(|e| ArtifactError::io(dir, e))?;

    let mut latest: Option<LocatedArtifact> = None;
    for entry in entries {
        let entry = entry.map_err(|e| ArtifactError::io(dir, e))?;
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        if !patterns.iter().any(|p| p.matches(&file_name)) {
            continue;
        }

        let path = entry.path();
        let metadata = entry.metadata().map_err(|e| ArtifactError::io(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        let created = created_at(&metadata).map_err(|e| ArtifactError::io(&path, e))?;

        if latest
            .as_ref()
            .is_none_or(|current| supersedes(created, &file_name, current))
        {
            latest = Some(LocatedArtifact {
                kind: Complexity::from_file_name(&file_name),
                path,
                file_name,
                created,
            });
        }
    }

    if let Some(found) = &latest {
        tracing::debug!(file = %found.file_name, "latest artifact");
    }
    Ok(latest)
}
