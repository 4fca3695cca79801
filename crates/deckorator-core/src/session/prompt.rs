//! The interactive input collaborator.
//!
//! A `Prompter` only collects raw replies. Validation, retries and writing
//! values back into the answer set belong to the merger, so terminal and
//! scripted implementations behave the same.

use deckorator_types::error::PromptError;

use crate::schema::Topic;

/// A reply to a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// Keep the current value.
    Keep,
    Value(T),
}

pub trait Prompter {
    /// Called once before the first question of each topic.
    fn announce_topic(&mut self, _topic: Topic) {}

    /// Free text. An empty `Value` means the same as `Keep`.
    fn ask_text(&mut self, prompt: &str, current: Option<&str>) -> Result<Reply<String>, PromptError>;

    /// Index into `options`.
    fn ask_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        current: Option<&str>,
    ) -> Result<Reply<usize>, PromptError>;

    fn ask_yes_no(&mut self, prompt: &str, current: Option<bool>) -> Result<Reply<bool>, PromptError>;

    /// The last reply was rejected and the question will be asked again.
    fn notify_invalid(&mut self, _message: &str) {}
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn announce_topic(&mut self, topic: Topic) {
        (**self).announce_topic(topic)
    }

    fn ask_text(&mut self, prompt: &str, current: Option<&str>) -> Result<Reply<String>, PromptError> {
        (**self).ask_text(prompt, current)
    }

    fn ask_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        current: Option<&str>,
    ) -> Result<Reply<usize>, PromptError> {
        (**self).ask_choice(prompt, options, current)
    }

    fn ask_yes_no(&mut self, prompt: &str, current: Option<bool>) -> Result<Reply<bool>, PromptError> {
        (**self).ask_yes_no(prompt, current)
    }

    fn notify_invalid(&mut self, message: &str) {
        (**self).notify_invalid(message)
    }
}
