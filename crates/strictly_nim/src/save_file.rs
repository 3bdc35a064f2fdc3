//! Plain-text save file: one `<pile_size>,<Human|Computer>` record per line.
//!
//! Records are written oldest first, so the last line is the current state.
//! There is no header, checksum or version.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::NimError;
use crate::history::History;
use crate::types::GameState;

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "NimGameSave.txt";

/// Renders a history as save-file text.
pub fn encode(history: &History) -> String {
    let mut text = String::with_capacity(history.len() * 12);
    for state in history.states() {
        text.push_str(&state.to_string());
        text.push('\n');
    }
    text
}

/// Parses save-file text into a history.
///
/// Every line must be a valid record; the first bad line fails the whole
/// parse. `source` names the file in the error for empty input.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn decode(text: &str, source: &str) -> Result<History, NimError> {
    let states = text
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            line.parse::<GameState>().map_err(|_| NimError::MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(records = states.len(), "Decoded save records");
    History::from_states(states).ok_or_else(|| NimError::NoSavedGame(source.to_string()))
}

/// Writes `history` to `path`, replacing whatever was there.
#[instrument(skip(history), fields(path = %path.display(), states = history.len()))]
pub fn write(path: &Path, history: &History) -> Result<(), NimError> {
    std::fs::write(path, encode(history)).map_err(|e| {
        warn!(error = %e, "Failed to write save file");
        NimError::io(path, &e)
    })?;
    info!("Save file written");
    Ok(())
}

/// Reads and decodes the history stored at `path`.
#[instrument(fields(path = %path.display()))]
pub fn read(path: &Path) -> Result<History, NimError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        warn!(error = %e, "Failed to read save file");
        NimError::io(path, &e)
    })?;
    decode(&text, &path.display().to_string())
}
