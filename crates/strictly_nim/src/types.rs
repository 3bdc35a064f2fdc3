//! Core domain types for 1-2 Nim.

use std::fmt;
use std::str::FromStr;

use crate::error::NimError;

/// Whose turn it is to remove marbles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Turn {
    /// The human player moves next.
    Human,
    /// The computer player moves next.
    Computer,
}

impl Turn {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Turn::Human => Turn::Computer,
            Turn::Computer => Turn::Human,
        }
    }

    /// Label used in save files ("Human" or "Computer").
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// One snapshot of the game: marbles left and whose turn it is.
///
/// States are plain values. The engine derives a new one for every accepted
/// move and never mutates a state that is already in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pile_size: u32,
    turn: Turn,
}

impl GameState {
    /// Creates a state.
    pub fn new(pile_size: u32, turn: Turn) -> Self {
        Self { pile_size, turn }
    }

    /// Marbles left in the pile.
    pub fn pile_size(&self) -> u32 {
        self.pile_size
    }

    /// Side that must move next.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// True once the pile is empty.
    pub fn is_terminal(&self) -> bool {
        self.pile_size == 0
    }

    /// State after the side to move removes `amount` marbles.
    ///
    /// Callers validate `amount` first; see [`crate::validate_move`].
    pub(crate) fn after_removing(self, amount: u32) -> Self {
        Self {
            pile_size: self.pile_size - amount,
            turn: self.turn.opponent(),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.pile_size, self.turn.label())
    }
}

impl FromStr for GameState {
    type Err = NimError;

    /// Parses the `"<pile_size>,<Human|Computer>"` record form.
    ///
    /// The line number in a returned [`NimError::MalformedLine`] is 0; the
    /// save-file reader fills in the real one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || NimError::MalformedLine {
            line: 0,
            content: s.to_string(),
        };

        let (pile, turn) = s.split_once(',').ok_or_else(malformed)?;
        let pile_size = pile.parse::<u32>().map_err(|_| malformed())?;
        let turn = turn.parse::<Turn>().map_err(|_| malformed())?;

        Ok(Self { pile_size, turn })
    }
}
