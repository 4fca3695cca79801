//! `deckorator submit`: package the latest request for a design assistant.
//!
//! Two methods: write copy-paste text for manual submission, or send the
//! request with site photos straight to the Anthropic Messages API. The API
//! path falls back to manual when no key is available.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use deckorator_core::artifact::ArtifactRepository;
use deckorator_core::submission::{
    MANUAL_SUBMISSION_FILE, PREVIEW_CHARS, RESPONSE_FILE, manual_submission_text, preview,
};
use deckorator_infra::filesystem::photos::find_photos;
use deckorator_infra::llm::{AnthropicSubmitter, load_photo_attachments};

use crate::state::AppState;

const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SubmitMethod {
    /// Write copy-paste text to a file.
    Manual,
    /// Send the request to the Anthropic API.
    Anthropic,
}

pub async fn run_submit(state: &AppState, method: Option<SubmitMethod>, json: bool) -> Result<()> {
    let Some(artifact) = state
        .repository
        .locate_latest()
        .context("Failed to look for planning requests")?
    else {
        bail!(
            "No planning request found in {}. Run `deckorator plan` first.",
            state.dir.display()
        );
    };
    let document = state
        .repository
        .read(&artifact)
        .with_context(|| format!("Failed to read {}", artifact.file_name))?;
    let photos = find_photos(&state.dir).context("Failed to look for site photos")?;
    tracing::debug!(file = %artifact.file_name, photos = photos.len(), "submitting request");

    let method = match method {
        Some(method) => method,
        None => match ask_method()? {
            Some(method) => method,
            None => {
                println!("Submission canceled.");
                return Ok(());
            }
        },
    };

    match method {
        SubmitMethod::Manual => submit_manual(state, &document, &photos, json).await,
        SubmitMethod::Anthropic => match api_key()? {
            Some(key) => submit_anthropic(state, key, &document, &photos, json).await,
            None => {
                if !json {
                    println!(
                        "  {} No API key given; preparing a manual submission instead.",
                        style("!").yellow().bold()
                    );
                }
                submit_manual(state, &document, &photos, json).await
            }
        },
    }
}

fn ask_method() -> Result<Option<SubmitMethod>> {
    let items = [
        "Write copy-paste text for manual submission",
        "Send directly through the Anthropic API",
    ];
    let selection = Select::new()
        .with_prompt("How do you want to submit?")
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|i| match i {
        0 => SubmitMethod::Manual,
        _ => SubmitMethod::Anthropic,
    }))
}

/// A non-blank key, as a secret.
fn usable_key(raw: Option<String>) -> Option<SecretString> {
    raw.map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}

/// Key from the environment, else a hidden prompt. Blank means none.
fn api_key() -> Result<Option<SecretString>> {
    if let Some(key) = usable_key(std::env::var(API_KEY_VAR).ok()) {
        tracing::debug!("using API key from {API_KEY_VAR}");
        return Ok(Some(key));
    }
    let entered = Password::new()
        .with_prompt("Anthropic API key (leave blank to submit manually)")
        .allow_empty_password(true)
        .interact()?;
    Ok(usable_key(Some(entered)))
}

async fn write_manual_submission(dir: &Path, document: &str, photo_count: usize) -> Result<PathBuf> {
    let path = dir.join(MANUAL_SUBMISSION_FILE);
    tokio::fs::write(&path, manual_submission_text(document, photo_count))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn file_names(photos: &[PathBuf]) -> Vec<String> {
    photos
        .iter()
        .filter_map(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

async fn submit_manual(state: &AppState, document: &str, photos: &[PathBuf], json: bool) -> Result<()> {
    let path = write_manual_submission(&state.dir, document, photos.len()).await?;
    tracing::info!(path = %path.display(), "wrote manual submission text");

    if json {
        let out = serde_json::json!({
            "method": "manual",
            "path": path,
            "photos": file_names(photos),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Submission text written to {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );
    println!();
    println!("  1. Open a new conversation with your assistant");
    println!("  2. Paste the contents of {MANUAL_SUBMISSION_FILE}");
    if photos.is_empty() {
        println!("  3. Add site photos when you have them");
    } else {
        println!("  3. Upload these photos with it:");
        for name in file_names(photos) {
            println!("       {}", style(name).dim());
        }
    }
    println!();
    Ok(())
}

async fn submit_anthropic(
    state: &AppState,
    api_key: SecretString,
    document: &str,
    photos: &[PathBuf],
    json: bool,
) -> Result<()> {
    let settings = &state.config.submission;
    let submitter = AnthropicSubmitter::new(api_key, settings)?;

    if photos.len() > settings.max_photos && !json {
        println!(
            "  {} Attaching the first {} of {} photos.",
            style("!").yellow().bold(),
            settings.max_photos,
            photos.len()
        );
    }
    let attachments = load_photo_attachments(photos, settings.max_photos).await;
    let attached = attachments.len();
    let request = submitter.build_request(document, attachments);

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Waiting for {}...", submitter.model()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = submitter.submit(&request).await;
    spinner.finish_and_clear();
    let text = result.context("Submission to the Anthropic API failed")?;

    let path = state.dir.join(RESPONSE_FILE);
    tokio::fs::write(&path, &text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), chars = text.len(), "wrote plan response");

    if json {
        let out = serde_json::json!({
            "method": "anthropic",
            "model": submitter.model(),
            "photos_attached": attached,
            "path": path,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Plans saved to {}",
        style("✓").green().bold(),
        style(path.display()).cyan()
    );
    println!();
    println!("  {}", style("── Preview ──").dim());
    for line in preview(&text, PREVIEW_CHARS).lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::tempdir;

    #[test]
    fn blank_keys_are_not_usable() {
        assert!(usable_key(None).is_none());
        assert!(usable_key(Some("   ".to_string())).is_none());
        let key = usable_key(Some(" sk-ant-123 \n".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "sk-ant-123");
    }

    #[tokio::test]
    async fn manual_submission_is_written_to_working_directory() {
        let dir = tempdir().unwrap();
        let path = write_manual_submission(dir.path(), "<deck_plan_request/>", 2)
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("deck_submission_text.txt"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("<deck_plan_request/>"));
        assert!(text.contains("I'm uploading 2 photos"));
    }

    #[test]
    fn photo_names_drop_directories() {
        let photos = vec![PathBuf::from("/site/a.jpg"), PathBuf::from("b.PNG")];
        assert_eq!(file_names(&photos), vec!["a.jpg", "b.PNG"]);
    }
}
