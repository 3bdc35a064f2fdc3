//! Ordered record of every state since the start of the game.

use tracing::instrument;

use crate::types::GameState;

/// States oldest first; the last entry is the current state.
///
/// A history is never empty. Undo pops back to the previous entry but never
/// removes the base state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    states: Vec<GameState>,
}

impl History {
    /// Starts a history at `base`.
    pub fn new(base: GameState) -> Self {
        Self { states: vec![base] }
    }

    /// Builds a history from states in order. Returns `None` if `states` is empty.
    pub fn from_states(states: Vec<GameState>) -> Option<Self> {
        if states.is_empty() {
            None
        } else {
            Some(Self { states })
        }
    }

    /// Current state.
    pub fn top(&self) -> GameState {
        // Invariant: at least the base state is present.
        self.states[self.states.len() - 1]
    }

    /// The state the history started from.
    pub fn base(&self) -> GameState {
        self.states[0]
    }

    /// Appends a new current state.
    pub fn push(&mut self, state: GameState) {
        self.states.push(state);
    }

    /// Drops the current state and returns the new top.
    ///
    /// Returns `None`, leaving the history untouched, when only the base
    /// state remains.
    #[instrument(level = "trace", skip(self), fields(len = self.states.len()))]
    pub fn pop(&mut self) -> Option<GameState> {
        if self.states.len() > 1 {
            self.states.pop();
            Some(self.top())
        } else {
            None
        }
    }

    /// Number of states, including the base.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of moves that can still be undone.
    pub fn undo_depth(&self) -> usize {
        self.states.len() - 1
    }

    /// All states, oldest first.
    pub fn states(&self) -> &[GameState] {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turn;

    #[test]
    fn test_base_cannot_be_popped() {
        let base = GameState::new(8, Turn::Human);
        let mut history = History::new(base);
        assert_eq!(history.pop(), None);
        assert_eq!(history.top(), base);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_pop_returns_previous() {
        let mut history = History::new(GameState::new(8, Turn::Human));
        history.push(GameState::new(6, Turn::Computer));
        history.push(GameState::new(5, Turn::Human));

        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.pop(), Some(GameState::new(6, Turn::Computer)));
        assert_eq!(history.pop(), Some(GameState::new(8, Turn::Human)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_from_states_requires_one() {
        assert!(History::from_states(Vec::new()).is_none());
        let history = History::from_states(vec![
            GameState::new(3, Turn::Human),
            GameState::new(1, Turn::Computer),
        ])
        .unwrap();
        assert_eq!(history.base(), GameState::new(3, Turn::Human));
        assert_eq!(history.top(), GameState::new(1, Turn::Computer));
    }
}
