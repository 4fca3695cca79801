//! Artifact naming and document kinds.
//!
//! Artifacts are written to the working directory as
//! `{kind_prefix}{YYYYMMDD_HHMMSS}.xml`. Archived copies keep the original
//! name behind [`ARCHIVE_PREFIX`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Marker prepended to superseded artifacts.
pub const ARCHIVE_PREFIX: &str = "archived_";

/// Extension shared by every artifact kind.
pub const ARTIFACT_EXTENSION: &str = "xml";

/// `chrono` format of the timestamp embedded in artifact names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The two document variants.
///
/// The complexity flag selects both the rendered variant and the artifact
/// kind (file prefix and root element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Basic,
    Advanced,
}

impl Complexity {
    pub const ALL: [Complexity; 2] = [Complexity::Basic, Complexity::Advanced];

    /// Canonical label stored in answer sets and documents.
    pub fn label(self) -> &'static str {
        match self {
            Complexity::Basic => "Basic",
            Complexity::Advanced => "Advanced",
        }
    }

    /// Document-kind tag written to `project_overview/kind`.
    pub fn document_kind(self) -> &'static str {
        match self {
            Complexity::Basic => "basic plan request",
            Complexity::Advanced => "construction specification request",
        }
    }

    /// Root element of the rendered document.
    pub fn root_tag(self) -> &'static str {
        match self {
            Complexity::Basic => "deck_plan_request",
            Complexity::Advanced => "construction_specification_request",
        }
    }

    /// File name prefix of artifacts of this kind.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Complexity::Basic => "deck_plan_request_",
            Complexity::Advanced => "construction_specs_request_",
        }
    }

    /// Glob matching live (non-archived) artifacts of this kind.
    pub fn file_pattern(self) -> String {
        format!("{}*.{}", self.file_prefix(), ARTIFACT_EXTENSION)
    }

    /// Normalize a free-form complexity or kind label.
    ///
    /// "advanced"/"construction" map to `Advanced`, "basic"/"plan" to `Basic`,
    /// case-insensitively. Anything else is unrecognized.
    pub fn normalize(raw: &str) -> Option<Complexity> {
        let lowered = raw.trim().to_lowercase();
        if lowered.contains("advanced") || lowered.contains("construction") {
            Some(Complexity::Advanced)
        } else if lowered.contains("basic") || lowered.contains("plan") {
            Some(Complexity::Basic)
        } else {
            None
        }
    }

    /// Kind of a live artifact, judged by its file name prefix.
    pub fn from_file_name(name: &str) -> Option<Complexity> {
        Complexity::ALL
            .into_iter()
            .find(|c| name.starts_with(c.file_prefix()))
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Complexity::normalize(s).ok_or_else(|| format!("invalid complexity: '{s}'"))
    }
}

/// Name of a fresh artifact of `complexity` created at `at`.
pub fn artifact_file_name(complexity: Complexity, at: NaiveDateTime) -> String {
    format!(
        "{}{}.{}",
        complexity.file_prefix(),
        at.format(TIMESTAMP_FORMAT),
        ARTIFACT_EXTENSION
    )
}

/// Name an artifact takes once archived.
pub fn archived_file_name(file_name: &str) -> String {
    format!("{ARCHIVE_PREFIX}{file_name}")
}

/// An artifact found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedArtifact {
    pub path: PathBuf,
    pub file_name: String,
    /// Creation time, or modification time where creation time is unavailable.
    pub created: SystemTime,
    pub kind: Option<Complexity>,
}

/// Result of persisting a new artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub path: PathBuf,
    /// Where the merge basis was moved, when one was archived.
    pub archived: Option<PathBuf>,
}
