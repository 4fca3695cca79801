//! Terminal prompter backed by dialoguer.
//!
//! Choice questions with a current answer get an extra first item to keep
//! it. Escape (or `q`) in a selection cancels the session, as does Ctrl+C
//! whenever the terminal reports it as an interrupted read.

use std::io;

use console::style;
use dialoguer::{Confirm, Input, Select};

use deckorator_core::schema::Topic;
use deckorator_core::session::{Prompter, Reply};
use deckorator_types::error::PromptError;

#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(err: dialoguer::Error) -> PromptError {
    let dialoguer::Error::IO(err) = err;
    match err.kind() {
        io::ErrorKind::Interrupted => PromptError::Interrupted,
        _ => PromptError::Io(err),
    }
}

/// Selection items, with "keep" in front when there is a current answer.
fn choice_items(options: &[&str], current: Option<&str>) -> Vec<String> {
    current
        .map(|current| format!("Keep current: {current}"))
        .into_iter()
        .chain(options.iter().map(|o| o.to_string()))
        .collect()
}

fn choice_reply(selection: usize, has_current: bool) -> Reply<usize> {
    match (has_current, selection) {
        (true, 0) => Reply::Keep,
        (true, n) => Reply::Value(n - 1),
        (false, n) => Reply::Value(n),
    }
}

fn text_prompt(prompt: &str, current: Option<&str>) -> String {
    match current {
        Some(current) => format!("{prompt} [{}]", style(current).dim()),
        None => prompt.to_string(),
    }
}

impl Prompter for DialoguerPrompter {
    fn announce_topic(&mut self, topic: Topic) {
        println!();
        println!("  {}", style(format!("── {topic} ──")).cyan().bold());
    }

    fn ask_text(&mut self, prompt: &str, current: Option<&str>) -> Result<Reply<String>, PromptError> {
        let reply = Input::<String>::new()
            .with_prompt(text_prompt(prompt, current))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        if reply.trim().is_empty() && current.is_some() {
            return Ok(Reply::Keep);
        }
        Ok(Reply::Value(reply))
    }

    fn ask_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        current: Option<&str>,
    ) -> Result<Reply<usize>, PromptError> {
        let items = choice_items(options, current);
        let selection = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(PromptError::Interrupted)?;
        Ok(choice_reply(selection, current.is_some()))
    }

    fn ask_yes_no(&mut self, prompt: &str, current: Option<bool>) -> Result<Reply<bool>, PromptError> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(current.unwrap_or(true))
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(PromptError::Interrupted)?;
        if current == Some(answer) {
            return Ok(Reply::Keep);
        }
        Ok(Reply::Value(answer))
    }

    fn notify_invalid(&mut self, message: &str) {
        println!("  {} {message}", style("✗").red().bold());
    }
}
