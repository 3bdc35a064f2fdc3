//! Error type for the Nim engine.

use crate::rules::MoveRejection;

/// Errors raised by the engine, its strategies and the save-file codec.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum NimError {
    /// The requested removal is not a legal move for the current pile.
    #[display("Illegal move: {} (pile has {} marbles)", reason, pile_size)]
    IllegalMove {
        /// Marbles the caller tried to remove.
        amount: u32,
        /// Marbles left in the pile at the time.
        pile_size: u32,
        /// Why the move was rejected.
        reason: MoveRejection,
    },

    /// The pile is empty; no further moves can be made.
    #[display("Game is already over")]
    GameOver,

    /// A move was requested from a player with no bound strategy.
    #[display("Player {} has no move strategy", player)]
    NoStrategy {
        /// Name of the player.
        player: String,
    },

    /// A strategy selection code other than R or Y.
    #[display("Unknown strategy code {:?} (expected R or Y)", _0)]
    InvalidStrategyCode(String),

    /// The interactive input source was closed before a legal move arrived.
    #[display("Move input closed")]
    InputClosed,

    /// Reading or writing the save file failed.
    #[display("Save file error on {}: {}", path, message)]
    Io {
        /// File that was being accessed.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },

    /// The save file exists but holds no states.
    #[display("No saved game found in {}", _0)]
    NoSavedGame(String),

    /// A save-file record that is not `<pile_size>,<Human|Computer>`.
    #[display("Malformed save record on line {}: {:?}", line, content)]
    MalformedLine {
        /// 1-based line number (0 when parsed outside a file).
        line: usize,
        /// The offending text.
        content: String,
    },

    /// Every record parses, but the history could not come from play.
    #[display("Inconsistent save file {}: {}", path, violations.join("; "))]
    InconsistentSave {
        /// File that was being loaded.
        path: String,
        /// Descriptions of the properties the history breaks.
        violations: Vec<String>,
    },
}

impl std::error::Error for NimError {}

impl NimError {
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
