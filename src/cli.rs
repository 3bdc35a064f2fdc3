//! Command-line interface for strictly_nim.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_nim::ComputerStrategy;

/// Strictly Nim - play 1-2 Nim against the computer
#[derive(Parser, Debug)]
#[command(name = "strictly_nim")]
#[command(about = "Take 1 or 2 marbles; whoever takes the last one wins", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "nim_config.toml")]
    pub config: PathBuf,

    /// Save file to use instead of the configured one
    #[arg(long, global = true)]
    pub save_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the text console
    Console {
        /// Computer strategy code (R = random, Y = alternating). Prompts if omitted.
        #[arg(short, long, value_parser = parse_strategy)]
        strategy: Option<ComputerStrategy>,
    },

    /// Play in the full-screen terminal UI
    Tui {
        /// Computer strategy code (R = random, Y = alternating). Chosen in the UI if omitted.
        #[arg(short, long, value_parser = parse_strategy)]
        strategy: Option<ComputerStrategy>,
    },
}

fn parse_strategy(code: &str) -> Result<ComputerStrategy, String> {
    ComputerStrategy::from_code(code).map_err(|e| e.to_string())
}
