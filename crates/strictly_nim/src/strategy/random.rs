//! Uniformly random computer strategy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use super::{MoveStrategy, StrategyKind};
use crate::error::NimError;
use crate::rules::{clamp_to_pile, MAX_REMOVE};

/// Removes 1 or 2 marbles with equal probability, capped at the pile size.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a strategy with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveStrategy for RandomStrategy {
    #[instrument(skip(self))]
    fn next_move(&mut self, pile_size: u32) -> Result<u32, NimError> {
        let draw = self.rng.gen_range(1..=MAX_REMOVE);
        let amount = clamp_to_pile(draw, pile_size);
        debug!(draw, amount, "Random strategy chose move");
        Ok(amount)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }
}
