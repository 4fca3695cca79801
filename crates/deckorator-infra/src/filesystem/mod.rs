//! Working-directory artifact repository.
//!
//! Implements the `ArtifactRepository` trait from `deckorator-core` against a
//! single flat directory. Artifacts, archived artifacts and site photos all
//! live side by side in it.

pub mod locator;
pub mod photos;
pub mod store;

use std::path::{Path, PathBuf};

use deckorator_core::artifact::ArtifactRepository;
use deckorator_types::artifact::{Complexity, LocatedArtifact, SavedArtifact};
use deckorator_types::error::ArtifactError;
use glob::Pattern;

/// Artifact repository rooted at a working directory.
pub struct LocalArtifactRepository {
    dir: PathBuf,
    patterns: Vec<Pattern>,
}

impl LocalArtifactRepository {
    /// Repository matching live artifacts of every kind.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let patterns: Vec<String> = Complexity::ALL.iter().map(|c| c.file_pattern()).collect();
        Self::with_patterns(dir, &patterns)
    }

    /// Repository matching only the given file name globs.
    pub fn with_patterns(dir: impl Into<PathBuf>, patterns: &[String]) -> Result<Self, ArtifactError> {
        Ok(Self {
            dir: dir.into(),
            patterns: locator::compile_patterns(patterns)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactRepository for LocalArtifactRepository {
    fn locate_latest(&self) -> Result<Option<LocatedArtifact>, ArtifactError> {
        locator::locate_latest(&self.dir, &self.patterns)
    }

    fn read(&self, artifact: &LocatedArtifact) -> Result<String, ArtifactError> {
        std::fs::read_to_string(&artifact.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ArtifactError::NotFound(artifact.path.clone()),
            _ => ArtifactError::io(&artifact.path, e),
        })
    }

    fn save(
        &self,
        file_name: &str,
        document: &str,
        basis: Option<&LocatedArtifact>,
    ) -> Result<SavedArtifact, ArtifactError> {
        store::save_artifact(&self.dir, file_name, document, basis)
    }
}
