//! Application state and key handling for the terminal UI.

use crossterm::event::KeyCode;
use strictly_nim::{ComputerStrategy, MoveRejection, NimError, NimGame, Player, Turn};
use tracing::{debug, info, instrument, warn};

use crate::config::NimConfig;

const CHOOSE_PROMPT: &str = "Select a computer strategy: [R] Random or [Y] Alternating";

/// Main application state.
///
/// There is no game until the user picks a computer strategy. After every
/// human action the computer answers straight away if it is its turn.
pub struct App {
    config: NimConfig,
    game: Option<NimGame>,
    status: String,
    should_quit: bool,
}

impl App {
    /// Creates an application waiting for a strategy choice.
    pub fn new(config: NimConfig) -> Self {
        Self {
            config,
            game: None,
            status: CHOOSE_PROMPT.to_string(),
            should_quit: false,
        }
    }

    /// Creates an application around an existing game.
    pub fn with_game(config: NimConfig, game: NimGame) -> Self {
        let mut app = Self::new(config);
        app.game = Some(game);
        app.status = app.turn_prompt();
        app.advance_computer();
        app
    }

    /// Current game, if one has started.
    pub fn game(&self) -> Option<&NimGame> {
        self.game.as_ref()
    }

    /// Current status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.start(ComputerStrategy::Random),
            KeyCode::Char('y') | KeyCode::Char('Y') => self.start(ComputerStrategy::Alternating),
            KeyCode::Char('1') => self.human_move(1),
            KeyCode::Char('2') => self.human_move(2),
            KeyCode::Char('u') | KeyCode::Char('U') => self.undo(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.save(),
            KeyCode::Char('l') | KeyCode::Char('L') => self.load(),
            other => debug!(?other, "Ignoring key"),
        }
    }

    /// Starts a new game, or resets the running one, with `choice`.
    pub fn start(&mut self, choice: ComputerStrategy) {
        match self.game.as_mut() {
            Some(game) => game.reset_with(choice),
            None => {
                let game = NimGame::new(
                    Player::human(self.config.human_name().as_str()),
                    Player::with_boxed_strategy(
                        self.config.computer_name().as_str(),
                        choice.build(),
                    ),
                )
                .with_save_path(self.config.save_path());
                self.game = Some(game);
            }
        }
        info!(strategy = choice.label(), "Game started");
        self.status = format!("{} strategy selected. {}", choice.label(), self.turn_prompt());
        self.advance_computer();
    }

    fn human_move(&mut self, amount: u32) {
        let Some(game) = self.game.as_mut() else {
            self.status = CHOOSE_PROMPT.to_string();
            return;
        };
        if game.is_game_over() || !game.is_human_turn() {
            return;
        }

        match game.assign_move(amount) {
            Ok(_) => {
                let noun = if amount == 1 { "marble" } else { "marbles" };
                self.status = format!("{} removed {amount} {noun}.", game.human_player().name());
                self.advance_computer();
            }
            Err(NimError::IllegalMove {
                reason: MoveRejection::ExceedsPile,
                ..
            }) => {
                self.status = format!("Oi! {}", MoveRejection::ExceedsPile);
            }
            Err(e) => {
                warn!(error = %e, "Move failed");
                self.status = e.to_string();
            }
        }
    }

    /// Undoes back to the human's previous decision.
    ///
    /// The computer replies immediately, so the human's last decision point
    /// is usually two states down. When the computer opened the game there is
    /// no such point and the history is left alone.
    fn undo(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let states = game.history().states();
        let top = states.len() - 1;
        let Some(target) = states[..top].iter().rposition(|s| s.turn() == Turn::Human) else {
            self.status = "No moves to undo".to_string();
            return;
        };

        for _ in target..top {
            game.undo_last_move();
        }
        debug!(popped = top - target, "Undid to human decision");
        self.status = format!("Undo last move! {}", self.turn_prompt());
    }

    fn save(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        self.status = match game.save_game() {
            Ok(()) => "The Game of 1-2 Nim is saved!".to_string(),
            Err(e) => format!("Save failed: {e}"),
        };
    }

    fn load(&mut self) {
        let Some(game) = self.game.as_mut() else {
            self.status = CHOOSE_PROMPT.to_string();
            return;
        };
        match game.load_game() {
            Ok(()) => {
                self.status = format!("The Game of 1-2 Nim is loaded! {}", self.turn_prompt());
                self.advance_computer();
            }
            Err(e) => self.status = format!("Load failed: {e}"),
        }
    }

    /// Lets the computer move while it is its turn and the game is running.
    fn advance_computer(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        while !game.is_game_over() && !game.is_human_turn() {
            match game.play_turn() {
                Ok(report) => {
                    let noun = if *report.amount() == 1 { "marble" } else { "marbles" };
                    self.status = format!("{} removed {} {noun}.", report.player(), report.amount());
                }
                Err(e) => {
                    warn!(error = %e, "Computer could not move");
                    self.status = e.to_string();
                    return;
                }
            }
        }
        if let Some(winner) = game.winner_name() {
            self.status = format!("{winner} wins! Press R or Y to play again, Q to quit.");
        }
    }

    fn turn_prompt(&self) -> String {
        match &self.game {
            Some(game) if game.is_game_over() => String::new(),
            Some(game) => format!("Turn: {}", game.player(game.turn()).name()),
            None => CHOOSE_PROMPT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_nim::{AlternatingStrategy, GameState};
    use tempfile::TempDir;

    fn app_at(pile: u32, turn: Turn) -> App {
        let game = NimGame::from_state(
            Player::human("Human"),
            Player::with_strategy("Computer", AlternatingStrategy::new()),
            GameState::new(pile, turn),
        );
        App::with_game(NimConfig::default(), game)
    }

    #[test]
    fn test_keys_need_a_game() {
        let mut app = App::new(NimConfig::default());
        app.handle_key(KeyCode::Char('1'));
        assert!(app.game().is_none());
        assert_eq!(app.status(), CHOOSE_PROMPT);
    }

    #[test]
    fn test_strategy_key_starts_game() {
        let mut app = App::new(NimConfig::default());
        app.handle_key(KeyCode::Char('y'));
        let game = app.game().expect("game started");
        assert!(game.is_human_turn() || game.is_game_over());
    }

    #[test]
    fn test_computer_answers_human_move() {
        let mut app = app_at(5, Turn::Human);
        app.handle_key(KeyCode::Char('2'));
        let game = app.game().unwrap();
        assert_eq!(game.marble_size(), 2);
        assert!(game.is_human_turn());
        assert_eq!(app.status(), "Computer removed 1 marble.");
    }

    #[test]
    fn test_computer_opens_when_first() {
        let app = app_at(9, Turn::Computer);
        let game = app.game().unwrap();
        assert_eq!(game.marble_size(), 8);
        assert!(game.is_human_turn());
    }

    #[test]
    fn test_overdraw_rejected() {
        let mut app = app_at(1, Turn::Human);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.game().unwrap().marble_size(), 1);
        assert!(app.status().contains("can't remove more"));
    }

    #[test]
    fn test_winning_move_announced() {
        let mut app = app_at(1, Turn::Human);
        app.handle_key(KeyCode::Char('1'));
        assert!(app.game().unwrap().is_game_over());
        assert!(app.status().starts_with("Human wins!"));

        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.game().unwrap().history().len(), 2);
    }

    #[test]
    fn test_undo_returns_to_human_decision() {
        let mut app = app_at(10, Turn::Human);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.game().unwrap().marble_size(), 7);

        app.handle_key(KeyCode::Char('u'));
        let game = app.game().unwrap();
        assert_eq!(game.state(), GameState::new(10, Turn::Human));
    }

    #[test]
    fn test_undo_at_start() {
        let mut app = app_at(10, Turn::Human);
        app.handle_key(KeyCode::Char('u'));
        assert_eq!(app.status(), "No moves to undo");
    }

    #[test]
    fn test_undo_before_human_moved_keeps_computer_opening() {
        let mut app = app_at(9, Turn::Computer);
        let before = app.game().unwrap().history().clone();

        app.handle_key(KeyCode::Char('u'));
        assert_eq!(app.status(), "No moves to undo");
        assert_eq!(app.game().unwrap().history(), &before);
        assert_eq!(app.game().unwrap().state(), GameState::new(8, Turn::Human));
    }

    #[test]
    fn test_undo_after_computer_opening_restores_exact_state() {
        let mut app = app_at(9, Turn::Computer);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.game().unwrap().state(), GameState::new(5, Turn::Human));

        app.handle_key(KeyCode::Char('u'));
        let game = app.game().unwrap();
        assert_eq!(game.state(), GameState::new(8, Turn::Human));
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_undo_after_human_win() {
        let mut app = app_at(4, Turn::Human);
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Char('1'));
        assert!(app.status().starts_with("Human wins!"));

        app.handle_key(KeyCode::Char('u'));
        let game = app.game().unwrap();
        assert_eq!(game.state(), GameState::new(1, Turn::Human));
        assert!(!game.is_game_over());
    }

    fn app_saving_to(dir: &TempDir, pile: u32) -> App {
        let config = NimConfig::default().with_save_path(dir.path().join("save.txt"));
        let game = NimGame::from_state(
            Player::human("Human"),
            Player::with_strategy("Computer", AlternatingStrategy::new()),
            GameState::new(pile, Turn::Human),
        )
        .with_save_path(config.save_path());
        App::with_game(config, game)
    }

    #[test]
    fn test_save_and_load_keys() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut app = app_saving_to(&dir, 12);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.game().unwrap().state(), GameState::new(9, Turn::Human));

        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.status(), "The Game of 1-2 Nim is saved!");

        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.game().unwrap().marble_size(), 6);

        app.handle_key(KeyCode::Char('l'));
        assert!(app.status().starts_with("The Game of 1-2 Nim is loaded!"));
        let game = app.game().unwrap();
        assert_eq!(game.state(), GameState::new(9, Turn::Human));
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_load_failure_keeps_game() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut app = app_saving_to(&dir, 12);
        let before = app.game().unwrap().history().clone();

        app.handle_key(KeyCode::Char('l'));
        assert!(app.status().starts_with("Load failed:"));
        assert_eq!(app.game().unwrap().history(), &before);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(NimConfig::default());
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }
}
