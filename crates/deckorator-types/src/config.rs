//! Configuration types for Deckorator.
//!
//! `DeckoratorConfig` represents the optional `deckorator.toml` in the working
//! directory. All fields have defaults, so an empty or missing file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "deckorator.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckoratorConfig {
    /// Supplier database, relative to the working directory unless absolute.
    #[serde(default = "default_supplier_database")]
    pub supplier_database: PathBuf,

    #[serde(default)]
    pub submission: SubmissionConfig,
}

fn default_supplier_database() -> PathBuf {
    PathBuf::from("suppliers_database.json")
}

impl Default for DeckoratorConfig {
    fn default() -> Self {
        Self {
            supplier_database: default_supplier_database(),
            submission: SubmissionConfig::default(),
        }
    }
}

/// Settings for the submission helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum number of photos attached to an API submission.
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_max_photos() -> usize {
    5
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            max_photos: default_max_photos(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
