//! Move legality and pile constants.
//!
//! Both front-ends and the engine share these checks, so a move is judged the
//! same way whether it came from a keypress, a console prompt or a strategy.

use tracing::instrument;

/// Smallest starting pile.
pub const MIN_PILE: u32 = 5;

/// Largest starting pile.
pub const MAX_PILE: u32 = 20;

/// Most marbles a single move may remove.
pub const MAX_REMOVE: u32 = 2;

/// Reason a requested removal is not a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// Amount outside {1, 2}.
    #[display("You can only remove 1 or 2 marbles!")]
    NotOneOrTwo,
    /// Amount larger than the pile.
    #[display("You can't remove more marbles than what's left!")]
    ExceedsPile,
}

/// Checks a removal against the current pile.
///
/// The range check comes first, so removing 3 from a pile of 2 reports
/// [`MoveRejection::NotOneOrTwo`].
#[instrument(level = "trace")]
pub fn validate_move(amount: u32, pile_size: u32) -> Result<(), MoveRejection> {
    if !(1..=MAX_REMOVE).contains(&amount) {
        return Err(MoveRejection::NotOneOrTwo);
    }
    if amount > pile_size {
        return Err(MoveRejection::ExceedsPile);
    }
    Ok(())
}

/// True when removing `amount` marbles from `pile_size` is allowed.
pub fn is_legal_move(amount: u32, pile_size: u32) -> bool {
    validate_move(amount, pile_size).is_ok()
}

/// Caps a strategy's preferred removal at what is left in the pile.
pub(crate) fn clamp_to_pile(amount: u32, pile_size: u32) -> u32 {
    amount.min(pile_size)
}
