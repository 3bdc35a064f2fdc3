//! Strictly Nim front-ends.
//!
//! The game rules live in [`strictly_nim`]; this crate wraps them in two
//! thin shells that only read engine state and forward user intent.
//!
//! # Architecture
//!
//! - **Console**: line-oriented menu loop over any reader and writer
//! - **TUI**: full-screen ratatui interface with automatic computer replies
//! - **Config**: TOML settings shared by both
//! - **CLI**: clap command-line parsing for the `strictly_nim` binary

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod tui;

pub use config::{ConfigError, NimConfig};
pub use console::{run_console, ConsoleOutcome};
pub use tui::{run_tui, App};
