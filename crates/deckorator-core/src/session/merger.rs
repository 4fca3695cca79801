//! The re-collection pass over an answer set.
//!
//! Each question either keeps the stored answer, replaces it, or collects a
//! fresh one. Invalid replies are rejected through
//! [`Prompter::notify_invalid`] and the question is asked again; only
//! [`PromptError`]s end the pass early.

use deckorator_types::answer::{AnswerSet, AnswerValue, FieldKey};
use deckorator_types::error::PromptError;
use deckorator_types::phase::{Assignment, Phase};
use tracing::debug;

use super::prompt::{Prompter, Reply};
use crate::schema::{self, Question, QuestionKind, Target, Topic};

/// Counts of what happened to each question during a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub kept: usize,
    pub replaced: usize,
    pub collected: usize,
    /// Conditional questions that did not apply, and optional ones left blank.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Kept,
    Replaced,
    Collected,
    Skipped,
}

pub struct SessionMerger {
    questions: Vec<Question>,
}

impl Default for SessionMerger {
    fn default() -> Self {
        Self::new(schema::questions())
    }
}

impl SessionMerger {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Ask every applicable question, writing results into `answers`.
    ///
    /// On `Err` the answer set may be partially updated; callers discard it.
    pub fn run<P: Prompter + ?Sized>(
        &self,
        answers: &mut AnswerSet,
        prompter: &mut P,
    ) -> Result<MergeSummary, PromptError> {
        let mut summary = MergeSummary::default();
        let mut current_topic: Option<Topic> = None;

        for question in &self.questions {
            if !question.applies(answers) {
                debug!(question = %question.prompt, "condition not met, skipping");
                summary.skipped += 1;
                continue;
            }
            if current_topic != Some(question.topic) {
                prompter.announce_topic(question.topic);
                current_topic = Some(question.topic);
            }

            let outcome = match question.target {
                Target::Field(key) => ask_field(question, key, answers, prompter)?,
                Target::Phase(phase) => ask_phase(question, phase, answers, prompter)?,
            };

            if question.target == Target::Field(FieldKey::PhotoAlbumUrl)
                && outcome == Outcome::Skipped
                && !answers.get(FieldKey::PhotoAlbumDescription).is_answered()
            {
                answers.set(
                    FieldKey::PhotoAlbumDescription,
                    AnswerValue::Text(schema::NO_ALBUM_DESCRIPTION.to_string()),
                );
            }

            match outcome {
                Outcome::Kept => summary.kept += 1,
                Outcome::Replaced => summary.replaced += 1,
                Outcome::Collected => summary.collected += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }

        debug!(
            kept = summary.kept,
            replaced = summary.replaced,
            collected = summary.collected,
            skipped = summary.skipped,
            "merge pass finished"
        );
        Ok(summary)
    }
}

fn record(answers: &mut AnswerSet, key: FieldKey, value: AnswerValue) -> Outcome {
    match answers.set(key, value) {
        Some(_) => Outcome::Replaced,
        None => Outcome::Collected,
    }
}

fn ask_field<P: Prompter + ?Sized>(
    question: &Question,
    key: FieldKey,
    answers: &mut AnswerSet,
    prompter: &mut P,
) -> Result<Outcome, PromptError> {
    match question.kind {
        QuestionKind::Text { optional } => ask_text(question, key, optional, answers, prompter),
        QuestionKind::Choice(options) => ask_choice(question, key, options, answers, prompter),
        QuestionKind::YesNo => ask_yes_no(question, key, answers, prompter),
        QuestionKind::Number { unit } => ask_number(question, key, unit, answers, prompter),
    }
}

fn ask_text<P: Prompter + ?Sized>(
    question: &Question,
    key: FieldKey,
    optional: bool,
    answers: &mut AnswerSet,
    prompter: &mut P,
) -> Result<Outcome, PromptError> {
    let current = answers.text(key).answered().map(str::to_string);
    loop {
        match prompter.ask_text(&question.prompt, current.as_deref())? {
            Reply::Value(raw) if !raw.trim().is_empty() => {
                let text = match question.normalize {
                    Some(normalize) => normalize(raw.trim()),
                    None => raw.trim().to_string(),
                };
                return Ok(record(answers, key, AnswerValue::Text(text)));
            }
            _ if current.is_some() => return Ok(Outcome::Kept),
            _ if optional => return Ok(Outcome::Skipped),
            _ => prompter.notify_invalid("An answer is required."),
        }
    }
}

fn ask_choice<P: Prompter + ?Sized>(
    question: &Question,
    key: FieldKey,
    options: &[&str],
    answers: &mut AnswerSet,
    prompter: &mut P,
) -> Result<Outcome, PromptError> {
    let current = answers.text(key).answered().map(str::to_string);
    loop {
        match prompter.ask_choice(&question.prompt, options, current.as_deref())? {
            Reply::Value(index) => match options.get(index) {
                Some(option) => {
                    return Ok(record(answers, key, AnswerValue::Choice(option.to_string())));
                }
                None => prompter.notify_invalid(&format!(
                    "Please choose one of the {} options.",
                    options.len()
                )),
            },
            Reply::Keep if current.is_some() => return Ok(Outcome::Kept),
            Reply::Keep => prompter.notify_invalid("There is no current answer to keep."),
        }
    }
}

fn ask_yes_no<P: Prompter + ?Sized>(
    question: &Question,
    key: FieldKey,
    answers: &mut AnswerSet,
    prompter: &mut P,
) -> Result<Outcome, PromptError> {
    let current = answers.flag(key).answered();
    loop {
        match prompter.ask_yes_no(&question.prompt, current)? {
            Reply::Value(value) => return Ok(record(answers, key, AnswerValue::Flag(value))),
            Reply::Keep if current.is_some() => return Ok(Outcome::Kept),
            Reply::Keep => prompter.notify_invalid("Please answer yes or no."),
        }
    }
}

/// A non-negative, finite number.
pub fn parse_measure(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

fn ask_number<P: Prompter + ?Sized>(
    question: &Question,
    key: FieldKey,
    unit: &str,
    answers: &mut AnswerSet,
    prompter: &mut P,
) -> Result<Outcome, PromptError> {
    let current = answers.measure(key).answered();
    let shown = current.map(|n| n.to_string());
    let prompt = format!("{} ({unit})", question.prompt);
    loop {
        match prompter.ask_text(&prompt, shown.as_deref())? {
            Reply::Value(raw) if !raw.trim().is_empty() => match parse_measure(&raw) {
                Some(n) => return Ok(record(answers, key, AnswerValue::Measure(n))),
                None => prompter.notify_invalid("Please enter a number, e.g. 12 or 12.5."),
            },
            _ if current.is_some() => return Ok(Outcome::Kept),
            _ => prompter.notify_invalid("A number is required."),
        }
    }
}

fn ask_phase<P: Prompter + ?Sized>(
    question: &Question,
    phase: Phase,
    answers: &mut AnswerSet,
    prompter: &mut P,
) -> Result<Outcome, PromptError> {
    let current = answers.assignment(phase).answered();
    loop {
        match prompter.ask_choice(
            &question.prompt,
            schema::ASSIGNMENT_OPTIONS,
            current.map(Assignment::as_str),
        )? {
            Reply::Value(index) => match Assignment::ALL.get(index) {
                Some(assignment) => {
                    answers.set_assignment(phase, *assignment);
                    return Ok(if current.is_some() {
                        Outcome::Replaced
                    } else {
                        Outcome::Collected
                    });
                }
                None => prompter.notify_invalid("Please choose DIY, Professional or Undecided."),
            },
            Reply::Keep if current.is_some() => return Ok(Outcome::Kept),
            Reply::Keep => prompter.notify_invalid("There is no current answer to keep."),
        }
    }
}
