//! Human strategy that asks an input source until a legal move arrives.

use tracing::{debug, instrument, warn};

use super::{MoveStrategy, StrategyKind};
use crate::error::NimError;
use crate::rules::{validate_move, MoveRejection};

/// Source of raw move requests from a person.
///
/// Front-ends implement this over whatever they read from (a console, a
/// scripted buffer). The strategy owns the validation loop; the input only
/// obtains numbers and shows rejections.
pub trait MoveInput {
    /// Asks for a move. May return any number; the caller validates it.
    ///
    /// Returns [`NimError::InputClosed`] when no more input can arrive.
    fn request_move(&mut self, pile_size: u32) -> Result<u32, NimError>;

    /// Tells the person why their last answer was refused.
    fn reject(&mut self, amount: u32, reason: MoveRejection);
}

impl<I: MoveInput + ?Sized> MoveInput for &mut I {
    fn request_move(&mut self, pile_size: u32) -> Result<u32, NimError> {
        (**self).request_move(pile_size)
    }

    fn reject(&mut self, amount: u32, reason: MoveRejection) {
        (**self).reject(amount, reason)
    }
}

/// Re-prompts its [`MoveInput`] until it yields 1 or 2 within the pile.
///
/// There is no timeout; the call blocks for as long as the input does.
#[derive(Debug)]
pub struct InteractiveStrategy<I> {
    input: I,
}

impl<I: MoveInput> InteractiveStrategy<I> {
    /// Wraps an input source.
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// Returns the wrapped input source.
    pub fn into_inner(self) -> I {
        self.input
    }
}

impl<I: MoveInput> MoveStrategy for InteractiveStrategy<I> {
    #[instrument(skip(self))]
    fn next_move(&mut self, pile_size: u32) -> Result<u32, NimError> {
        loop {
            let amount = self.input.request_move(pile_size)?;
            match validate_move(amount, pile_size) {
                Ok(()) => {
                    debug!(amount, "Accepted interactive move");
                    return Ok(amount);
                }
                Err(reason) => {
                    warn!(amount, %reason, "Rejected interactive move");
                    self.input.reject(amount, reason);
                }
            }
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Interactive
    }
}
