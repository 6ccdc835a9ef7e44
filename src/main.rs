//! Tic-tac-toe - terminal entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use time_travel_tictactoe::{GameConfig, replay, run_tui};
use std::fs::File;
use std::sync::Arc;
use tracing::{Subscriber, info};
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&config),
        Command::Replay { moves, jump, json } => run_replay(&config, &moves, jump, json),
    }
}

/// `RUST_LOG` wins over the configured filter.
fn env_filter(config: &GameConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Run the interactive TUI
fn run_play(config: &GameConfig) -> Result<()> {
    // Log to file to avoid interfering with the TUI
    let log_file = File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    file_subscriber(env_filter(config), log_file).init();

    run_tui(config)
}

/// Plain-text subscriber writing to `log_file`, for use while the TUI owns the terminal.
fn file_subscriber(filter: EnvFilter, log_file: File) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .finish()
}

/// Apply moves headlessly and print the outcome
fn run_replay(config: &GameConfig, moves: &[usize], jump: Option<usize>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .init();

    info!(count = moves.len(), "Replaying moves");
    let report = replay(moves, jump)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text(*config.show_coordinates()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::debug;

    #[test]
    fn test_file_subscriber_writes_plain_text() {
        let log = tempfile::NamedTempFile::new().unwrap();
        let subscriber = file_subscriber(EnvFilter::new("info"), log.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            info!(step = 3, "Jumped");
            debug!("Filtered out");
        });

        let written = std::fs::read_to_string(log.path()).unwrap();
        assert!(written.contains("Jumped"));
        assert!(written.contains("step=3"));
        assert!(!written.contains("Filtered out"));
        assert!(!written.contains('\u{1b}'));
    }
}
