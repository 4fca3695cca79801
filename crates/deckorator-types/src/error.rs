use std::path::PathBuf;

use thiserror::Error;

use crate::answer::FieldKey;

/// Errors from locating, reading, or persisting artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("no artifact found in {0}")]
    NotFound(PathBuf),

    #[error("refusing to overwrite existing file {0}")]
    AlreadyExists(PathBuf),

    #[error("invalid artifact pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.into(),
            source,
        }
    }
}

/// The document text is not a well-formed tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Non-fatal problem found while parsing an artifact back into answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("document could not be parsed: {0}")]
    Malformed(String),

    #[error("field '{field}' not found (looked for {path})")]
    MissingField { field: String, path: String },

    #[error("field '{field}' has unusable value '{value}'")]
    InvalidValue { field: String, value: String },
}

impl ParseWarning {
    pub fn missing(key: FieldKey, path: &str) -> Self {
        ParseWarning::MissingField {
            field: key.to_string(),
            path: path.to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        ParseWarning::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Errors raised by an interactive prompt provider.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,

    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that end a planning session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user cancelled; nothing was written.
    #[error("planning session canceled")]
    Interrupted,

    #[error("prompt failed: {0}")]
    Prompt(std::io::Error),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl From<PromptError> for SessionError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => SessionError::Interrupted,
            PromptError::Io(e) => SessionError::Prompt(e),
        }
    }
}

/// Errors related to the supplier directory.
#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("supplier directory has no 'default' entry")]
    MissingDefault,

    #[error("failed to parse supplier database: {0}")]
    Parse(String),
}

/// Errors from submitting a document to a text-generation service.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Deserialization(String),

    #[error("response contained no text")]
    EmptyResponse,
}
