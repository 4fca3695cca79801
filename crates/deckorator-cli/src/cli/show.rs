//! `deckorator show`: print the answers recorded in the latest request.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use deckorator_core::artifact::ArtifactRepository;
use deckorator_core::document::{ParseOutcome, parse_document};
use deckorator_types::answer::{Answer, AnswerSet, FieldKey};
use deckorator_types::artifact::LocatedArtifact;

use crate::state::AppState;

pub fn show_latest(state: &AppState, json: bool) -> Result<()> {
    let Some(artifact) = state
        .repository
        .locate_latest()
        .context("Failed to look for planning requests")?
    else {
        if json {
            println!("null");
        } else {
            println!();
            println!(
                "  No planning request found in {}. Start one with: deckorator plan",
                state.dir.display()
            );
            println!();
        }
        return Ok(());
    };

    let text = state
        .repository
        .read(&artifact)
        .with_context(|| format!("Failed to read {}", artifact.file_name))?;
    let outcome = parse_document(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&show_json(&artifact, &outcome))?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("*").cyan().bold(),
        style(&artifact.file_name).cyan().bold()
    );
    if let Some(version) = &outcome.template_version {
        println!("  {}", style(format!("template version {version}")).dim());
    }
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(Color::White),
        Cell::new("Answer").fg(Color::White),
    ]);
    for (key, value) in answer_rows(&outcome.answers) {
        let value_cell = match value {
            Some(value) => Cell::new(value),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(key.as_str()), value_cell]);
    }
    println!("{table}");

    if !outcome.warnings.is_empty() {
        println!();
        println!("  {}", style("── Warnings ──").dim());
        for warning in &outcome.warnings {
            println!("  {} {warning}", style("!").yellow().bold());
        }
    }
    println!();
    Ok(())
}

/// Every field in schema order, with its display value when answered.
fn answer_rows(answers: &AnswerSet) -> Vec<(FieldKey, Option<String>)> {
    FieldKey::ALL
        .into_iter()
        .map(|key| match answers.get(key) {
            Answer::Answered(value) => (key, Some(value.to_string())),
            Answer::Unanswered => (key, None),
        })
        .collect()
}

fn show_json(artifact: &LocatedArtifact, outcome: &ParseOutcome) -> serde_json::Value {
    let answers: serde_json::Map<String, serde_json::Value> = answer_rows(&outcome.answers)
        .into_iter()
        .map(|(key, value)| (key.as_str().to_string(), value.into()))
        .collect();
    let warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();

    serde_json::json!({
        "file": artifact.file_name,
        "path": artifact.path,
        "complexity": artifact.kind.map(|k| k.label()),
        "template_version": outcome.template_version,
        "answers": answers,
        "warnings": warnings,
    })
}
