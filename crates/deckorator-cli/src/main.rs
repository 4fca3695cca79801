//! Deckorator CLI entry point.
//!
//! Binary name: `deckorator`
//!
//! Parses CLI arguments, loads the working-directory state, then dispatches
//! to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags when set
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,deckorator=debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "deckorator", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli.dir).await?;

    match cli.command {
        Commands::Plan { fresh } => {
            cli::plan::run_plan(&state, fresh, cli.json)?;
        }

        Commands::Show => {
            cli::show::show_latest(&state, cli.json)?;
        }

        Commands::Submit { method } => {
            cli::submit::run_submit(&state, method, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
