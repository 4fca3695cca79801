//! Shared domain types for Deckorator.
//!
//! This crate contains the types used across the Deckorator workspace:
//! the answer set and its closed field schema, construction phases, supplier
//! lookup, artifact naming, configuration, and the error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod answer;
pub mod artifact;
pub mod config;
pub mod error;
pub mod phase;
pub mod supplier;
