//! CLI command definitions for the `deckorator` binary.

pub mod plan;
pub mod prompt;
pub mod show;
pub mod submit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Plan a deck project and prepare the request for a design assistant.
#[derive(Parser)]
#[command(name = "deckorator", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Working directory holding artifacts, photos and config.
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a planning session, updating the latest request if there is one.
    Plan {
        /// Ignore any existing request and start from scratch.
        #[arg(long)]
        fresh: bool,
    },

    /// Show the answers recorded in the latest request.
    Show,

    /// Package the latest request for submission.
    Submit {
        /// How to submit; asked interactively when omitted.
        #[arg(long, value_enum)]
        method: Option<submit::SubmitMethod>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
