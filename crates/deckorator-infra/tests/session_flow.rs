//! End-to-end planning sessions against a real working directory.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use deckorator_core::artifact::ArtifactRepository;
use deckorator_core::document::Element;
use deckorator_core::session::{PlanningSession, Prompter, Reply};
use deckorator_infra::filesystem::LocalArtifactRepository;
use deckorator_infra::supplier::load_supplier_directory;
use deckorator_types::answer::{Answer, FieldKey};
use deckorator_types::artifact::Complexity;
use deckorator_types::error::{PromptError, SessionError};
use deckorator_types::phase::{Assignment, Phase};
use tempfile::tempdir;

/// Answers by prompt prefix; anything unscripted keeps the current value or
/// takes the first option.
#[derive(Default)]
struct ScriptedPrompter {
    texts: HashMap<&'static str, &'static str>,
    choices: HashMap<&'static str, &'static str>,
    interrupt_on: Option<&'static str>,
}

impl ScriptedPrompter {
    fn text(mut self, prompt: &'static str, reply: &'static str) -> Self {
        self.texts.insert(prompt, reply);
        self
    }

    fn choose(mut self, prompt: &'static str, option: &'static str) -> Self {
        self.choices.insert(prompt, option);
        self
    }

    fn check_interrupt(&self, prompt: &str) -> Result<(), PromptError> {
        match self.interrupt_on {
            Some(p) if prompt.starts_with(p) => Err(PromptError::Interrupted),
            _ => Ok(()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_text(&mut self, prompt: &str, current: Option<&str>) -> Result<Reply<String>, PromptError> {
        self.check_interrupt(prompt)?;
        let scripted = self
            .texts
            .iter()
            .find(|(p, _)| prompt.starts_with(*p))
            .map(|(_, reply)| reply.to_string());
        Ok(match (scripted, current) {
            (Some(reply), _) => Reply::Value(reply),
            (None, Some(_)) => Reply::Keep,
            (None, None) => Reply::Value(String::new()),
        })
    }

    fn ask_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        current: Option<&str>,
    ) -> Result<Reply<usize>, PromptError> {
        self.check_interrupt(prompt)?;
        let scripted = self
            .choices
            .iter()
            .find(|(p, _)| prompt.starts_with(*p))
            .and_then(|(_, option)| options.iter().position(|o| o == option));
        Ok(match (scripted, current) {
            (Some(index), _) => Reply::Value(index),
            (None, Some(_)) => Reply::Keep,
            (None, None) => Reply::Value(0),
        })
    }

    fn ask_yes_no(&mut self, prompt: &str, current: Option<bool>) -> Result<Reply<bool>, PromptError> {
        self.check_interrupt(prompt)?;
        Ok(match current {
            Some(_) => Reply::Keep,
            None => Reply::Value(true),
        })
    }
}

fn fresh_answers() -> ScriptedPrompter {
    ScriptedPrompter::default()
        .text("Describe your deck project", "Low deck off the kitchen")
        .choose("How big a deck?", "Medium (200-400 sq ft)")
        .text("Zip code", "22032")
        .text("Deck length", "16")
        .text("Deck width", "12")
        .choose("How high off the ground?", "Ground level (under 30 inches)")
        .choose("Who will handle Footings & Foundation?", "Professional")
}

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn fresh_session_writes_basic_request() {
    let dir = tempdir().unwrap();
    // No database on disk: the built-in directory is used.
    let suppliers = load_supplier_directory(&dir.path().join("suppliers_database.json")).await;
    let repo = LocalArtifactRepository::new(dir.path()).unwrap();
    let session = PlanningSession::new(&repo, &suppliers);

    assert!(session.discover().unwrap().is_none());
    let outcome = session.run(None, &mut fresh_answers(), at(9, 0)).unwrap();

    assert_eq!(outcome.complexity, Complexity::Basic);
    assert!(!outcome.merged);
    assert!(!outcome.permit_required);
    assert_eq!(file_names(dir.path()), vec!["deck_plan_request_20261019_090000.xml"]);

    let written = std::fs::read_to_string(&outcome.saved.path).unwrap();
    assert_eq!(written, outcome.document);
    let root = Element::parse(&written).unwrap();
    let suppliers: Vec<&str> = root
        .find(&["local_resources", "suppliers"])
        .unwrap()
        .children()
        .iter()
        .filter_map(Element::text)
        .collect();
    assert_eq!(
        suppliers,
        vec!["Home Depot Burke", "Lowe's Burke", "Superior Building Supply"]
    );
    assert!(written.contains("<permit_required>false</permit_required>"));
    assert!(written.contains("<total_square_feet>192</total_square_feet>"));
    assert!(!written.contains("structural_calculations"));
    assert!(written.contains("Individual photos will be uploaded"));
}

#[tokio::test]
async fn update_session_changes_one_answer_and_archives_basis() {
    let dir = tempdir().unwrap();
    let suppliers = load_supplier_directory(&dir.path().join("missing.json")).await;
    let repo = LocalArtifactRepository::new(dir.path()).unwrap();
    let session = PlanningSession::new(&repo, &suppliers);
    session.run(None, &mut fresh_answers(), at(9, 0)).unwrap();

    let located = session.discover().unwrap().unwrap();
    let basis = session.load_basis(located).unwrap();
    assert!(basis.is_usable());
    assert!(basis.outcome.warnings.is_empty(), "{:?}", basis.outcome.warnings);

    let mut prompter = ScriptedPrompter::default()
        .choose("How high off the ground?", "High deck (over 6 feet)");
    let outcome = session.run(Some(basis), &mut prompter, at(9, 30)).unwrap();

    assert!(outcome.merged);
    assert!(outcome.permit_required);
    assert_eq!(outcome.summary.replaced, 1);
    assert_eq!(outcome.summary.collected, 0);
    assert_eq!(
        outcome.answers.text(FieldKey::ProjectDescription),
        Answer::Answered("Low deck off the kitchen")
    );
    assert_eq!(
        outcome.answers.assignment(Phase::FootingsAndFoundation),
        Answer::Answered(Assignment::Professional)
    );
    assert_eq!(
        file_names(dir.path()),
        vec![
            "archived_deck_plan_request_20261019_090000.xml",
            "deck_plan_request_20261019_093000.xml",
        ]
    );

    // The archived copy is not picked up as a basis again.
    let latest = repo.locate_latest().unwrap().unwrap();
    assert_eq!(latest.file_name, "deck_plan_request_20261019_093000.xml");
}

#[tokio::test]
async fn malformed_basis_starts_fresh_and_stays_in_place() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("deck_plan_request_20261018_120000.xml");
    std::fs::write(&broken, "<deck_plan_request><project_overview>").unwrap();

    let suppliers = load_supplier_directory(&dir.path().join("missing.json")).await;
    let repo = LocalArtifactRepository::new(dir.path()).unwrap();
    let session = PlanningSession::new(&repo, &suppliers);

    let basis = session.load_basis(session.discover().unwrap().unwrap()).unwrap();
    assert!(!basis.is_usable());
    assert_eq!(basis.outcome.warnings.len(), 1);
    assert!(basis.outcome.answers.is_empty());

    let outcome = session.run(Some(basis), &mut fresh_answers(), at(10, 0)).unwrap();
    assert!(!outcome.merged);
    assert!(outcome.saved.archived.is_none());
    assert!(broken.exists());
    assert_eq!(
        file_names(dir.path()),
        vec![
            "deck_plan_request_20261018_120000.xml",
            "deck_plan_request_20261019_100000.xml",
        ]
    );
}

#[tokio::test]
async fn interrupted_session_leaves_directory_untouched() {
    let dir = tempdir().unwrap();
    let suppliers = load_supplier_directory(&dir.path().join("missing.json")).await;
    let repo = LocalArtifactRepository::new(dir.path()).unwrap();
    let session = PlanningSession::new(&repo, &suppliers);

    let mut prompter = fresh_answers();
    prompter.interrupt_on = Some("Decking material");
    let err = session.run(None, &mut prompter, at(11, 0)).unwrap_err();

    assert!(matches!(err, SessionError::Interrupted));
    assert!(file_names(dir.path()).is_empty());
}
