//! `deckorator plan`: run a planning session in the working directory.

use anyhow::{Context, Result};
use console::style;

use deckorator_core::session::{LoadedBasis, PlanningSession, Prompter, Reply, SessionOutcome};
use deckorator_infra::filesystem::LocalArtifactRepository;
use deckorator_types::error::{PromptError, SessionError};

use super::prompt::DialoguerPrompter;
use crate::state::AppState;

const CANCELED: &str = "Planning session canceled.";

pub fn run_plan(state: &AppState, fresh: bool, json: bool) -> Result<()> {
    let session = PlanningSession::new(&state.repository, &state.suppliers);
    let mut prompter = DialoguerPrompter::new();

    let basis = if fresh {
        None
    } else {
        match choose_basis(&session, &mut prompter) {
            Ok(basis) => basis,
            Err(PromptError::Interrupted) => {
                println!("{CANCELED}");
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read your answer"),
        }
    };

    let now = chrono::Local::now().naive_local();
    let outcome = match session.run(basis, &mut prompter, now) {
        Ok(outcome) => outcome,
        Err(SessionError::Interrupted) => {
            println!("{CANCELED}");
            return Ok(());
        }
        Err(err) => return Err(err).context("Planning session failed"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

/// Offer the latest prior request as a starting point.
fn choose_basis(
    session: &PlanningSession<'_, LocalArtifactRepository>,
    prompter: &mut DialoguerPrompter,
) -> Result<Option<LoadedBasis>, PromptError> {
    let artifact = match session.discover() {
        Ok(Some(artifact)) => artifact,
        Ok(None) => return Ok(None),
        Err(err) => {
            tracing::warn!("Could not look for earlier requests: {err}");
            return Ok(None);
        }
    };

    println!();
    println!(
        "  {} Found {}",
        style("*").cyan().bold(),
        style(&artifact.file_name).yellow()
    );
    let update = matches!(
        prompter.ask_yes_no("Update it instead of starting over?", None)?,
        Reply::Value(true)
    );
    if !update {
        return Ok(None);
    }

    let basis = match session.load_basis(artifact) {
        Ok(basis) => basis,
        Err(err) => {
            tracing::warn!("Could not read the earlier request: {err}");
            return Ok(None);
        }
    };
    if !basis.is_usable() {
        println!(
            "  {} That file could not be read; starting a fresh session and leaving it in place.",
            style("!").yellow().bold()
        );
    } else if !basis.outcome.warnings.is_empty() {
        println!(
            "  {} {} answer(s) could not be recovered and will be asked again.",
            style("!").yellow().bold(),
            basis.outcome.warnings.len()
        );
    }
    Ok(Some(basis))
}

fn outcome_json(outcome: &SessionOutcome) -> serde_json::Value {
    serde_json::json!({
        "path": outcome.saved.path,
        "archived": outcome.saved.archived,
        "complexity": outcome.complexity.label(),
        "permit_required": outcome.permit_required,
        "merged": outcome.merged,
        "summary": {
            "kept": outcome.summary.kept,
            "replaced": outcome.summary.replaced,
            "collected": outcome.summary.collected,
            "skipped": outcome.summary.skipped,
        },
    })
}

fn print_outcome(outcome: &SessionOutcome) {
    println!();
    println!(
        "  {} Saved {}",
        style("✓").green().bold(),
        outcome.complexity.document_kind()
    );
    println!();
    println!("  {}  {}", style("File:").bold(), outcome.saved.path.display());
    if let Some(archived) = &outcome.saved.archived {
        println!(
            "  {}  {}",
            style("Previous version:").bold(),
            style(archived.display()).dim()
        );
    }
    if outcome.merged {
        let summary = &outcome.summary;
        println!(
            "  {}  {} kept, {} changed, {} new",
            style("Answers:").bold(),
            summary.kept,
            summary.replaced,
            summary.collected
        );
    }
    if outcome.permit_required {
        println!(
            "  {} A building permit is likely required for this deck.",
            style("!").yellow().bold()
        );
    }
    println!();
    println!(
        "  {}",
        style("Next: add site photos to this directory, then run `deckorator submit`.").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckorator_core::session::MergeSummary;
    use deckorator_types::answer::AnswerSet;
    use deckorator_types::artifact::{Complexity, SavedArtifact};
    use std::path::PathBuf;

    #[test]
    fn outcome_json_reports_paths_and_counts() {
        let outcome = SessionOutcome {
            answers: AnswerSet::new(),
            complexity: Complexity::Advanced,
            document: String::new(),
            saved: SavedArtifact {
                path: PathBuf::from("construction_specs_request_20261019_090000.xml"),
                archived: None,
            },
            summary: MergeSummary {
                kept: 3,
                ..MergeSummary::default()
            },
            permit_required: true,
            merged: false,
        };
        let json = outcome_json(&outcome);
        assert_eq!(json["path"], "construction_specs_request_20261019_090000.xml");
        assert!(json["archived"].is_null());
        assert_eq!(json["complexity"], "Advanced");
        assert_eq!(json["summary"]["kept"], 3);
    }
}
