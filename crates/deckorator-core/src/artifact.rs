//! Artifact repository trait.
//!
//! Defines how a session finds, reads and persists request documents.
//! The filesystem implementation lives in deckorator-infra.

use deckorator_types::artifact::{LocatedArtifact, SavedArtifact};
use deckorator_types::error::ArtifactError;

/// Storage for request documents.
pub trait ArtifactRepository {
    /// The most recently created live artifact, if any.
    fn locate_latest(&self) -> Result<Option<LocatedArtifact>, ArtifactError>;

    /// Raw text of an artifact.
    fn read(&self, artifact: &LocatedArtifact) -> Result<String, ArtifactError>;

    /// Persist `document` as `file_name`.
    ///
    /// When `basis` is given it is archived before the new artifact becomes
    /// visible. Neither name may already exist.
    fn save(
        &self,
        file_name: &str,
        document: &str,
        basis: Option<&LocatedArtifact>,
    ) -> Result<SavedArtifact, ArtifactError>;
}
