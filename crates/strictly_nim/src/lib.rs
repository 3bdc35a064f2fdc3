//! Pure game logic for 1-2 Nim.
//!
//! Two players take turns removing one or two marbles from a shared pile.
//! Whoever removes the last marble wins. This crate holds everything that
//! has rules attached: the turn/pile state machine, the move strategies, the
//! undo history and the save-file format. Front-ends only read state from
//! [`NimGame`] and forward user intent into it.
//!
//! # Example
//!
//! ```
//! use strictly_nim::{AlternatingStrategy, GameState, NimGame, Player, Turn};
//!
//! let mut game = NimGame::from_state(
//!     Player::human("Human"),
//!     Player::with_strategy("Computer", AlternatingStrategy::new()),
//!     GameState::new(5, Turn::Human),
//! );
//!
//! game.assign_move(2)?;
//! let report = game.play_turn()?;
//! assert_eq!(*report.amount(), 1);
//! assert_eq!(game.marble_size(), 2);
//! assert!(!game.is_game_over());
//! # Ok::<(), strictly_nim::NimError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod history;
mod player;
mod rules;
mod strategy;
mod types;

pub mod invariants;
pub mod save_file;

pub use error::NimError;
pub use game::{NimGame, TurnReport};
pub use history::History;
pub use player::Player;
pub use rules::{is_legal_move, validate_move, MoveRejection, MAX_PILE, MAX_REMOVE, MIN_PILE};
pub use strategy::{
    AlternatingStrategy, ComputerStrategy, InteractiveStrategy, MoveInput, MoveStrategy,
    RandomStrategy, StrategyKind,
};
pub use types::{GameState, Turn};
