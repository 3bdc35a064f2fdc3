//! The 1-2 Nim engine: pile, turn, undo history, save and reset.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::error::NimError;
use crate::history::History;
use crate::invariants::{HistoryInvariants, InvariantSet};
use crate::player::Player;
use crate::rules::{validate_move, MAX_PILE, MIN_PILE};
use crate::save_file::{self, DEFAULT_SAVE_PATH};
use crate::strategy::ComputerStrategy;
use crate::types::{GameState, Turn};

/// Outcome of [`NimGame::play_turn`].
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TurnReport {
    /// Name of the player who moved.
    player: String,
    /// Side that moved.
    turn: Turn,
    /// Marbles removed.
    amount: u32,
    /// State after the move.
    state: GameState,
}

/// A single game session between a human and a computer player.
///
/// The current state is always the top of the history. Every accepted move
/// pushes a new state; undo pops back to the previous one but never past the
/// state the game started from.
#[derive(Debug)]
pub struct NimGame {
    human: Player,
    computer: Player,
    history: History,
    save_path: PathBuf,
}

/// Draws a starting pile in `[MIN_PILE, MAX_PILE]` and a starting side.
fn random_start<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let pile_size = rng.gen_range(MIN_PILE..=MAX_PILE);
    let turn = if rng.gen_bool(0.5) {
        Turn::Human
    } else {
        Turn::Computer
    };
    GameState::new(pile_size, turn)
}

impl NimGame {
    /// Starts a game with a random pile and a random first player.
    pub fn new(human: Player, computer: Player) -> Self {
        Self::with_rng(human, computer, &mut rand::thread_rng())
    }

    /// Like [`NimGame::new`], drawing the start from `rng`.
    #[instrument(skip_all, fields(human = %human.name(), computer = %computer.name()))]
    pub fn with_rng<R: Rng + ?Sized>(human: Player, computer: Player, rng: &mut R) -> Self {
        let start = random_start(rng);
        info!(pile = start.pile_size(), first = %start.turn(), "New game");
        Self::from_state(human, computer, start)
    }

    /// Starts a game from an explicit state.
    pub fn from_state(human: Player, computer: Player, start: GameState) -> Self {
        Self {
            human,
            computer,
            history: History::new(start),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }

    /// Sets the file used by [`NimGame::save_game`] and [`NimGame::load_game`].
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// File used by [`NimGame::save_game`] and [`NimGame::load_game`].
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    // ─────────────────────────────────────────────────────────────
    //  State queries
    // ─────────────────────────────────────────────────────────────

    /// Current state.
    pub fn state(&self) -> GameState {
        self.history.top()
    }

    /// Marbles left in the pile.
    pub fn marble_size(&self) -> u32 {
        self.state().pile_size()
    }

    /// Side that moves next.
    pub fn turn(&self) -> Turn {
        self.state().turn()
    }

    /// True when the human moves next.
    pub fn is_human_turn(&self) -> bool {
        self.turn() == Turn::Human
    }

    /// Every state since the start, oldest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The human player.
    pub fn human_player(&self) -> &Player {
        &self.human
    }

    /// The computer player.
    pub fn computer_player(&self) -> &Player {
        &self.computer
    }

    /// Mutable access to the human player.
    pub fn human_player_mut(&mut self) -> &mut Player {
        &mut self.human
    }

    /// Mutable access to the computer player.
    pub fn computer_player_mut(&mut self) -> &mut Player {
        &mut self.computer
    }

    /// The player playing `turn`.
    pub fn player(&self, turn: Turn) -> &Player {
        match turn {
            Turn::Human => &self.human,
            Turn::Computer => &self.computer,
        }
    }

    /// True once the pile is empty.
    pub fn is_game_over(&self) -> bool {
        self.state().is_terminal()
    }

    /// The winning side, once the game is over.
    ///
    /// The side facing the empty pile loses, so the winner is whoever removed
    /// the last marble.
    pub fn winner(&self) -> Option<Turn> {
        self.is_game_over().then(|| self.turn().opponent())
    }

    /// Name of the winning player, once the game is over.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|side| self.player(side).name())
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves and undo
    // ─────────────────────────────────────────────────────────────

    /// Removes `amount` marbles for the side to move and passes the turn.
    ///
    /// # Errors
    ///
    /// [`NimError::GameOver`] on an empty pile, [`NimError::IllegalMove`] if
    /// `amount` is not 1 or 2 or exceeds the pile. The state is unchanged on
    /// error.
    #[instrument(skip(self), fields(pile = self.marble_size(), turn = %self.turn()))]
    pub fn assign_move(&mut self, amount: u32) -> Result<GameState, NimError> {
        let current = self.state();
        if current.is_terminal() {
            warn!("Move attempted after game over");
            return Err(NimError::GameOver);
        }

        validate_move(amount, current.pile_size()).map_err(|reason| {
            warn!(%reason, "Rejected move");
            NimError::IllegalMove {
                amount,
                pile_size: current.pile_size(),
                reason,
            }
        })?;

        let next = current.after_removing(amount);
        self.history.push(next);
        debug!(pile = next.pile_size(), next = %next.turn(), "Move applied");
        Ok(next)
    }

    /// Asks the side to move for a move through its strategy and applies it.
    ///
    /// # Errors
    ///
    /// [`NimError::GameOver`] on an empty pile, [`NimError::NoStrategy`] if
    /// that player has no strategy, or whatever the strategy or
    /// [`NimGame::assign_move`] reports.
    #[instrument(skip(self), fields(turn = %self.turn()))]
    pub fn play_turn(&mut self) -> Result<TurnReport, NimError> {
        if self.is_game_over() {
            return Err(NimError::GameOver);
        }

        let current = self.state();
        let mover = match current.turn() {
            Turn::Human => &mut self.human,
            Turn::Computer => &mut self.computer,
        };
        let amount = mover.get_move(current.pile_size())?;
        let player = mover.name().to_string();

        let state = self.assign_move(amount)?;
        info!(%player, amount, pile = state.pile_size(), "Turn played");
        Ok(TurnReport {
            player,
            turn: current.turn(),
            amount,
            state,
        })
    }

    /// Steps back to the state before the last move.
    ///
    /// Returns `false` and changes nothing when no move has been made since
    /// the start (or since the last load or reset).
    #[instrument(skip(self), fields(depth = self.history.undo_depth()))]
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some(restored) => {
                info!(pile = restored.pile_size(), turn = %restored.turn(), "Move undone");
                true
            }
            None => {
                info!("No moves to undo");
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Persistence
    // ─────────────────────────────────────────────────────────────

    /// Writes the whole history to the configured save file.
    pub fn save_game(&self) -> Result<(), NimError> {
        self.save_to(&self.save_path)
    }

    /// Writes the whole history to `path`, replacing its contents.
    pub fn save_to(&self, path: &Path) -> Result<(), NimError> {
        save_file::write(path, &self.history)
    }

    /// Replaces the session with the history stored in the configured file.
    pub fn load_game(&mut self) -> Result<(), NimError> {
        let path = self.save_path.clone();
        self.load_from(&path)
    }

    /// Replaces the session with the history stored at `path`.
    ///
    /// The file is read, parsed and checked against [`HistoryInvariants`]
    /// before anything changes, so a missing, empty, malformed or impossible
    /// history leaves the current session intact.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_from(&mut self, path: &Path) -> Result<(), NimError> {
        let loaded = save_file::read(path)?;

        if let Err(violations) = HistoryInvariants::check_all(&loaded) {
            for violation in &violations {
                warn!(invariant = %violation.description, "Loaded history breaks invariant");
            }
            return Err(NimError::InconsistentSave {
                path: path.display().to_string(),
                violations: violations.into_iter().map(|v| v.description).collect(),
            });
        }

        self.history = loaded;
        info!(
            states = self.history.len(),
            pile = self.marble_size(),
            turn = %self.turn(),
            "Game loaded"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Reset
    // ─────────────────────────────────────────────────────────────

    /// Starts over with the computer strategy named by `code` (`R` or `Y`).
    ///
    /// # Errors
    ///
    /// [`NimError::InvalidStrategyCode`] for any other code; the game is left
    /// exactly as it was.
    pub fn reset_game(&mut self, code: &str) -> Result<ComputerStrategy, NimError> {
        let choice = ComputerStrategy::from_code(code).map_err(|e| {
            warn!(code, "Reset aborted: unknown strategy code");
            e
        })?;
        self.reset_with(choice);
        Ok(choice)
    }

    /// Starts over with a fresh `choice` strategy for the computer.
    pub fn reset_with(&mut self, choice: ComputerStrategy) {
        self.reset_with_rng(choice, &mut rand::thread_rng());
    }

    /// Like [`NimGame::reset_with`], drawing the new start from `rng`.
    ///
    /// The history is cut back to the single new start state, so undo cannot
    /// reach into the previous game.
    #[instrument(skip(self, rng))]
    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, choice: ComputerStrategy, rng: &mut R) {
        self.computer.set_strategy(choice.build());
        let start = random_start(rng);
        self.history = History::new(start);
        info!(pile = start.pile_size(), first = %start.turn(), "Game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AlternatingStrategy, StrategyKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_at(pile: u32, turn: Turn) -> NimGame {
        NimGame::from_state(
            Player::human("Human"),
            Player::with_strategy("Computer", AlternatingStrategy::new()),
            GameState::new(pile, turn),
        )
    }

    #[test]
    fn test_start_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let game = NimGame::with_rng(Player::human("H"), Player::human("C"), &mut rng);
            assert!((MIN_PILE..=MAX_PILE).contains(&game.marble_size()));
            assert_eq!(game.history().len(), 1);
        }
    }

    #[test]
    fn test_start_turn_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(11);
        let human_first = (0..2000)
            .filter(|_| {
                NimGame::with_rng(Player::human("H"), Player::human("C"), &mut rng).is_human_turn()
            })
            .count();
        assert!((800..=1200).contains(&human_first), "got {human_first}");
    }

    #[test]
    fn test_assign_move_subtracts_and_flips() {
        let mut game = game_at(10, Turn::Human);
        let next = game.assign_move(2).unwrap();
        assert_eq!(next, GameState::new(8, Turn::Computer));
        assert_eq!(game.marble_size(), 8);
        assert!(!game.is_human_turn());
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_illegal_moves_leave_state() {
        let mut game = game_at(1, Turn::Human);
        assert!(matches!(game.assign_move(2), Err(NimError::IllegalMove { .. })));
        assert!(matches!(game.assign_move(0), Err(NimError::IllegalMove { .. })));
        assert!(matches!(game.assign_move(3), Err(NimError::IllegalMove { .. })));
        assert_eq!(game.state(), GameState::new(1, Turn::Human));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut game = game_at(1, Turn::Human);
        game.assign_move(1).unwrap();
        assert_eq!(game.assign_move(1), Err(NimError::GameOver));
        assert!(matches!(game.play_turn(), Err(NimError::GameOver)));
    }

    #[test]
    fn test_game_over_only_at_zero() {
        let mut game = game_at(3, Turn::Computer);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        game.assign_move(2).unwrap();
        assert!(!game.is_game_over());
        game.assign_move(1).unwrap();
        assert!(game.is_game_over());
        // Computer took 2, Human took the last marble.
        assert_eq!(game.winner(), Some(Turn::Human));
        assert_eq!(game.winner_name(), Some("Human"));
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut game = game_at(9, Turn::Computer);
        assert!(!game.undo_last_move());
        assert_eq!(game.state(), GameState::new(9, Turn::Computer));
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut game = game_at(9, Turn::Computer);
        game.assign_move(1).unwrap();
        assert!(game.undo_last_move());
        assert_eq!(game.state(), GameState::new(9, Turn::Computer));
        assert!(!game.undo_last_move());
    }

    #[test]
    fn test_play_turn_uses_strategy() {
        let mut game = game_at(6, Turn::Computer);
        let report = game.play_turn().unwrap();
        assert_eq!(report.player(), "Computer");
        assert_eq!(*report.turn(), Turn::Computer);
        assert_eq!(*report.amount(), 1);
        assert_eq!(*report.state(), GameState::new(5, Turn::Human));
    }

    #[test]
    fn test_play_turn_without_strategy_fails_fast() {
        let mut game = game_at(6, Turn::Human);
        assert!(matches!(game.play_turn(), Err(NimError::NoStrategy { .. })));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_invalid_reset_code_changes_nothing() {
        let mut game = game_at(6, Turn::Human);
        game.assign_move(1).unwrap();
        let before = game.history().clone();

        let err = game.reset_game("Z").unwrap_err();
        assert_eq!(err, NimError::InvalidStrategyCode("Z".to_string()));
        assert_eq!(game.history(), &before);
        assert_eq!(
            game.computer_player().strategy_kind(),
            Some(StrategyKind::Alternating)
        );
    }

    #[test]
    fn test_reset_rebinds_and_clears_history() {
        let mut game = game_at(6, Turn::Human);
        game.assign_move(1).unwrap();
        game.assign_move(2).unwrap();

        let choice = game.reset_game("r").unwrap();
        assert_eq!(choice, ComputerStrategy::Random);
        assert_eq!(game.computer_player().strategy_kind(), Some(StrategyKind::Random));
        assert_eq!(game.history().len(), 1);
        assert!((MIN_PILE..=MAX_PILE).contains(&game.marble_size()));
        assert!(!game.undo_last_move(), "undo must not reach the previous game");
    }
}
