//! Move strategies: the decision rule that turns a pile size into a move.

mod alternating;
mod interactive;
mod random;

pub use alternating::AlternatingStrategy;
pub use interactive::{InteractiveStrategy, MoveInput};
pub use random::RandomStrategy;

use std::str::FromStr;

use tracing::instrument;

use crate::error::NimError;

/// Trait for anything that can choose how many marbles to remove.
pub trait MoveStrategy {
    /// Chooses a move for the given pile.
    ///
    /// Implementations return 1 or 2, never more than `pile_size`. The pile
    /// is expected to hold at least one marble.
    fn next_move(&mut self, pile_size: u32) -> Result<u32, NimError>;

    /// Which family of strategy this is.
    fn kind(&self) -> StrategyKind;
}

/// Strategy families, used by front-ends to describe a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum StrategyKind {
    /// Moves come from a person through a [`MoveInput`].
    Interactive,
    /// Uniformly random 1 or 2.
    Random,
    /// 1, 2, 1, 2, ...
    Alternating,
}

/// Strategies a computer player can be given, selected by a one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ComputerStrategy {
    /// Code `R`: [`RandomStrategy`].
    Random,
    /// Code `Y`: [`AlternatingStrategy`].
    Alternating,
}

impl ComputerStrategy {
    /// Parses a selection code. Case and surrounding whitespace are ignored.
    #[instrument]
    pub fn from_code(code: &str) -> Result<Self, NimError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(Self::Random),
            "Y" => Ok(Self::Alternating),
            _ => Err(NimError::InvalidStrategyCode(code.trim().to_string())),
        }
    }

    /// The canonical selection code.
    pub fn code(self) -> char {
        match self {
            Self::Random => 'R',
            Self::Alternating => 'Y',
        }
    }

    /// Menu label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Alternating => "Alternating",
        }
    }

    /// The strategy family this selection builds.
    pub fn kind(self) -> StrategyKind {
        match self {
            Self::Random => StrategyKind::Random,
            Self::Alternating => StrategyKind::Alternating,
        }
    }

    /// Builds a fresh strategy instance.
    pub fn build(self) -> Box<dyn MoveStrategy> {
        match self {
            Self::Random => Box::new(RandomStrategy::new()),
            Self::Alternating => Box::new(AlternatingStrategy::new()),
        }
    }
}

impl FromStr for ComputerStrategy {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
