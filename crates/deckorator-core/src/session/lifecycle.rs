//! Planning session lifecycle.
//!
//! discover -> load basis -> merge -> resolve suppliers -> synthesize -> save.
//! The answer set is passed explicitly from stage to stage; nothing touches
//! the repository until the merge pass has finished, so an interrupted
//! session leaves the working directory unchanged.

use chrono::NaiveDateTime;
use deckorator_types::answer::{AnswerSet, FieldKey};
use deckorator_types::artifact::{Complexity, LocatedArtifact, SavedArtifact, artifact_file_name};
use deckorator_types::error::{ArtifactError, SessionError};
use deckorator_types::supplier::SupplierDirectory;
use tracing::{debug, info, warn};

use super::merger::{MergeSummary, SessionMerger};
use super::prompt::Prompter;
use crate::artifact::ArtifactRepository;
use crate::document::{ParseOutcome, RenderContext, parse_document, permit_required, synthesize};

/// A located prior artifact together with what could be read from it.
#[derive(Debug, Clone)]
pub struct LoadedBasis {
    pub artifact: LocatedArtifact,
    pub outcome: ParseOutcome,
}

impl LoadedBasis {
    /// Malformed documents are never used as a merge basis, and so are
    /// never archived either.
    pub fn is_usable(&self) -> bool {
        !self.outcome.is_malformed()
    }
}

/// Everything a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub answers: AnswerSet,
    pub complexity: Complexity,
    pub document: String,
    pub saved: SavedArtifact,
    pub summary: MergeSummary,
    pub permit_required: bool,
    /// Whether a prior artifact seeded the answers.
    pub merged: bool,
}

pub struct PlanningSession<'a, R> {
    repository: &'a R,
    suppliers: &'a SupplierDirectory,
    merger: SessionMerger,
}

impl<'a, R: ArtifactRepository> PlanningSession<'a, R> {
    pub fn new(repository: &'a R, suppliers: &'a SupplierDirectory) -> Self {
        Self {
            repository,
            suppliers,
            merger: SessionMerger::default(),
        }
    }

    /// Replace the question list, mainly for tests.
    pub fn with_merger(mut self, merger: SessionMerger) -> Self {
        self.merger = merger;
        self
    }

    /// The most recent prior artifact, if any.
    pub fn discover(&self) -> Result<Option<LocatedArtifact>, ArtifactError> {
        let found = self.repository.locate_latest()?;
        match &found {
            Some(artifact) => debug!(file = %artifact.file_name, "found prior artifact"),
            None => debug!("no prior artifact found"),
        }
        Ok(found)
    }

    /// Read and parse a located artifact. Parse problems are logged, not
    /// returned; only I/O failures are errors.
    pub fn load_basis(&self, artifact: LocatedArtifact) -> Result<LoadedBasis, ArtifactError> {
        let text = self.repository.read(&artifact)?;
        let outcome = parse_document(&text);
        for warning in &outcome.warnings {
            warn!(file = %artifact.file_name, "{warning}");
        }
        if let Some(version) = &outcome.template_version {
            debug!(file = %artifact.file_name, version = %version, "prior template version");
        }
        Ok(LoadedBasis { artifact, outcome })
    }

    /// Run the merge pass over `basis` (or an empty answer set) and persist
    /// the resulting document, archiving the basis when one was used.
    pub fn run<P: Prompter + ?Sized>(
        &self,
        basis: Option<LoadedBasis>,
        prompter: &mut P,
        now: NaiveDateTime,
    ) -> Result<SessionOutcome, SessionError> {
        let (mut answers, archive) = match basis {
            Some(basis) if basis.is_usable() => {
                info!(file = %basis.artifact.file_name, "updating prior artifact");
                (basis.outcome.answers, Some(basis.artifact))
            }
            Some(basis) => {
                warn!(
                    file = %basis.artifact.file_name,
                    "prior artifact is malformed; starting fresh and leaving it in place"
                );
                (AnswerSet::new(), None)
            }
            None => (AnswerSet::new(), None),
        };

        let summary = self.merger.run(&mut answers, prompter)?;

        let complexity = answers.complexity().answered().unwrap_or(Complexity::Basic);
        let zip = answers.text(FieldKey::ZipCode).answered().unwrap_or_default();
        let suppliers = self.suppliers.resolve(zip);
        debug!(zip, area = %suppliers.area, "resolved suppliers");

        let document = synthesize(
            &answers,
            &RenderContext {
                complexity,
                suppliers,
                generated_on: now.date(),
            },
        );

        let file_name = artifact_file_name(complexity, now);
        let saved = self
            .repository
            .save(&file_name, &document, archive.as_ref())?;
        info!(path = %saved.path.display(), "wrote {}", complexity.document_kind());

        Ok(SessionOutcome {
            permit_required: permit_required(&answers),
            merged: archive.is_some(),
            answers,
            complexity,
            document,
            saved,
            summary,
        })
    }
}
