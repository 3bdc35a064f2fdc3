//! Computer strategy that alternates between removing one and two marbles.

use tracing::{debug, instrument};

use super::{MoveStrategy, StrategyKind};
use crate::error::NimError;
use crate::rules::clamp_to_pile;

/// Removes 1, then 2, then 1, ... across calls on the same instance.
///
/// The parity bit belongs to the instance: it carries over between the
/// player's turns and only starts over when a new instance is built.
#[derive(Debug, Clone, Default)]
pub struct AlternatingStrategy {
    two_next: bool,
}

impl AlternatingStrategy {
    /// Creates a strategy whose first move removes one marble.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoveStrategy for AlternatingStrategy {
    #[instrument(skip(self), fields(two_next = self.two_next))]
    fn next_move(&mut self, pile_size: u32) -> Result<u32, NimError> {
        let preferred = if self.two_next { 2 } else { 1 };
        self.two_next = !self.two_next;

        let amount = clamp_to_pile(preferred, pile_size);
        debug!(preferred, amount, "Alternating strategy chose move");
        Ok(amount)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Alternating
    }
}
