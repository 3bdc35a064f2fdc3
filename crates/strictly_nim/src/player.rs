//! A named participant, optionally bound to a move strategy.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::error::NimError;
use crate::strategy::{MoveStrategy, StrategyKind};

/// A player in the game.
///
/// Human players are usually created without a strategy; the front-end
/// collects their moves itself. Computer players always carry one.
pub struct Player {
    name: String,
    strategy: Option<Box<dyn MoveStrategy>>,
}

impl Player {
    /// Creates a player without a strategy.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: None,
        }
    }

    /// Creates a player whose moves come from `strategy`.
    pub fn with_strategy(name: impl Into<String>, strategy: impl MoveStrategy + 'static) -> Self {
        Self::with_boxed_strategy(name, Box::new(strategy))
    }

    /// Creates a player from an already boxed strategy.
    pub fn with_boxed_strategy(name: impl Into<String>, strategy: Box<dyn MoveStrategy>) -> Self {
        Self {
            name: name.into(),
            strategy: Some(strategy),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the bound strategy, if any.
    pub fn strategy_kind(&self) -> Option<StrategyKind> {
        self.strategy.as_ref().map(|s| s.kind())
    }

    /// True when a strategy is bound.
    pub fn has_strategy(&self) -> bool {
        self.strategy.is_some()
    }

    /// Asks the bound strategy for a move.
    ///
    /// # Errors
    ///
    /// [`NimError::NoStrategy`] if the player has no strategy, plus anything
    /// the strategy itself reports.
    #[instrument(skip(self), fields(player = %self.name))]
    pub fn get_move(&mut self, pile_size: u32) -> Result<u32, NimError> {
        match self.strategy.as_mut() {
            Some(strategy) => strategy.next_move(pile_size),
            None => {
                warn!("Move requested from player without a strategy");
                Err(NimError::NoStrategy {
                    player: self.name.clone(),
                })
            }
        }
    }

    /// Replaces the bound strategy.
    #[instrument(skip(self, strategy), fields(player = %self.name, kind = %strategy.kind()))]
    pub fn set_strategy(&mut self, strategy: Box<dyn MoveStrategy>) {
        info!("Rebinding player strategy");
        self.strategy = Some(strategy);
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("strategy", &self.strategy_kind())
            .finish()
    }
}
