//! Text-generation service clients for the submission helper.

pub mod anthropic;
pub mod types;

pub use anthropic::{AnthropicSubmitter, load_photo_attachments};
