//! Properties every history produced by play must satisfy.
//!
//! A save file can be edited by hand, so the engine checks a loaded history
//! against [`HistoryInvariants`] and refuses it when any property fails.

use crate::history::History;
use crate::rules::{is_legal_move, MAX_PILE};

/// A property that must hold for a value of type `S`.
pub trait Invariant<S> {
    /// True when `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Short description used in logs and load errors.
    fn description() -> &'static str;
}

/// One failed property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the failed property.
    pub description: String,
}

impl InvariantViolation {
    /// Builds a violation for the property described by `description`.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A group of properties checked together.
pub trait InvariantSet<S> {
    /// Checks every member, collecting all failures rather than stopping at the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($member:ident),+) => {
        impl<S, $($member),+> InvariantSet<S> for ($($member,)+)
        where
            $($member: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($member::holds(state), $member::description())),+]
                    .into_iter()
                    .filter(|(held, _)| !held)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();

                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1);
impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);

/// The starting pile is no larger than a new game can deal.
pub struct BoundedStart;

impl Invariant<History> for BoundedStart {
    fn holds(history: &History) -> bool {
        history.base().pile_size() <= MAX_PILE
    }

    fn description() -> &'static str {
        "Starting pile is at most 20 marbles"
    }
}

/// Consecutive states belong to different sides.
pub struct AlternatingTurns;

impl Invariant<History> for AlternatingTurns {
    fn holds(history: &History) -> bool {
        history
            .states()
            .windows(2)
            .all(|pair| pair[1].turn() == pair[0].turn().opponent())
    }

    fn description() -> &'static str {
        "Turn flips between consecutive states"
    }
}

/// Each step removes a legal number of marbles from the previous pile.
pub struct LegalRemovals;

impl Invariant<History> for LegalRemovals {
    fn holds(history: &History) -> bool {
        history.states().windows(2).all(|pair| {
            let (before, after) = (pair[0].pile_size(), pair[1].pile_size());
            after <= before && is_legal_move(before - after, before)
        })
    }

    fn description() -> &'static str {
        "Each step removes 1 or 2 marbles"
    }
}

/// Invariants checked on every history.
pub type HistoryInvariants = (BoundedStart, AlternatingTurns, LegalRemovals);
