//! Core logic for Deckorator.
//!
//! Owns the question schema, the document layout shared by the synthesizer
//! and the parser, the merge pass over an [`AnswerSet`](deckorator_types::answer::AnswerSet),
//! and the session lifecycle that ties them to an artifact repository.
//! No filesystem, terminal or network code lives here; those are behind the
//! [`artifact::ArtifactRepository`] and [`session::prompt::Prompter`] traits.

pub mod artifact;
pub mod document;
pub mod schema;
pub mod session;
pub mod submission;
