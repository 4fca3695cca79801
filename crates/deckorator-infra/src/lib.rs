//! Infrastructure for Deckorator: the working-directory artifact repository,
//! config and supplier loaders, and the Anthropic submission client.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod supplier;
