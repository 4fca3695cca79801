//! The planning session: prompt collaborator, merge pass and lifecycle.

pub mod lifecycle;
pub mod merger;
pub mod prompt;

pub use lifecycle::{LoadedBasis, PlanningSession, SessionOutcome};
pub use merger::{MergeSummary, SessionMerger};
pub use prompt::{Prompter, Reply};
