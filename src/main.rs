//! Strictly Nim - unified CLI
//!
//! Play 1-2 Nim against the computer in a console or a terminal UI.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use strictly_nim_games::cli::{Cli, Command};
use strictly_nim_games::{run_console, run_tui, ConsoleOutcome, NimConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Console { strategy } => {
            initialize_console_tracing();
            let config = load_config(&cli.config, cli.save_file.as_deref())?;
            let stdin = std::io::stdin();
            let outcome = run_console(stdin.lock(), std::io::stdout().lock(), &config, strategy)?;
            info!(?outcome, "Console session ended");
            if outcome == ConsoleOutcome::InvalidStrategy {
                std::process::exit(2);
            }
            Ok(())
        }
        Command::Tui { strategy } => {
            let config = load_config(&cli.config, cli.save_file.as_deref())?;
            initialize_tui_tracing(config.log_file())?;
            run_tui(config, strategy)
        }
    }
}

#[instrument(skip(save_override), fields(config_path = %config_path.display()))]
fn load_config(config_path: &Path, save_override: Option<&Path>) -> Result<NimConfig> {
    info!("Loading configuration");
    let mut config = NimConfig::load_or_default(config_path)?;

    // Override save file if provided
    if let Some(path) = save_override {
        info!(path = %path.display(), "Overriding save file");
        config = config.with_save_path(path);
    }

    Ok(config)
}

/// Console output shares the terminal, so only warnings go to stderr by default.
fn initialize_console_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Logs to a file so tracing output does not interfere with the TUI.
fn initialize_tui_tracing(log_path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(log_path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_nim=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}
