//! Line-oriented text front-end.
//!
//! Reads menu choices and moves from any [`BufRead`] and writes to any
//! [`Write`], so whole sessions can be scripted in tests.

use std::io::{BufRead, Write};

use anyhow::Result;
use derive_new::new;
use strictly_nim::{
    ComputerStrategy, InteractiveStrategy, MoveInput, MoveRejection, MoveStrategy, NimError,
    NimGame, Player, Turn,
};
use tracing::{debug, info, instrument, warn};

use crate::config::NimConfig;

/// How a console session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// The pile ran out; holds the winner's name.
    Finished(String),
    /// The user chose to quit.
    Quit,
    /// The opening strategy choice was not R or Y.
    InvalidStrategy,
    /// Input ended before the game did.
    InputClosed,
}

/// Runs a full console session.
///
/// With `strategy` unset the user is asked for one first, as in the menu's
/// clear option.
#[instrument(skip_all, fields(preset = ?strategy))]
pub fn run_console<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    config: &NimConfig,
    strategy: Option<ComputerStrategy>,
) -> Result<ConsoleOutcome> {
    let mut console = Console { reader, writer };

    writeln!(console.writer, "The Game of 1-2 Nim!")?;
    writeln!(console.writer, "------------------------------")?;

    let choice = match strategy {
        Some(choice) => choice,
        None => {
            console.strategy_menu()?;
            let Some(code) = console.read_line()? else {
                return Ok(ConsoleOutcome::InputClosed);
            };
            match ComputerStrategy::from_code(&code) {
                Ok(choice) => choice,
                Err(e) => {
                    warn!(error = %e, "Invalid opening strategy");
                    writeln!(console.writer, "Invalid option. Exiting.")?;
                    return Ok(ConsoleOutcome::InvalidStrategy);
                }
            }
        }
    };
    writeln!(console.writer, "You selected {} computer strategy.", choice.label())?;

    let game = NimGame::new(
        Player::human(config.human_name().as_str()),
        Player::with_boxed_strategy(config.computer_name().as_str(), choice.build()),
    )
    .with_save_path(config.save_path());

    console.play(game)
}

struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Reads one trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        read_trimmed(&mut self.reader)
    }

    fn strategy_menu(&mut self) -> Result<()> {
        writeln!(self.writer, "Choose a computer strategy:")?;
        writeln!(self.writer, "[R] Random")?;
        writeln!(self.writer, "[Y] Alternating")?;
        Ok(())
    }

    fn play(&mut self, mut game: NimGame) -> Result<ConsoleOutcome> {
        self.announce_start(&game)?;

        while !game.is_game_over() {
            writeln!(self.writer)?;
            writeln!(self.writer, "Choose an option:")?;
            writeln!(self.writer, "[M] Make a move")?;
            writeln!(self.writer, "[S] Save game")?;
            writeln!(self.writer, "[L] Load saved game")?;
            writeln!(self.writer, "[U] Undo move")?;
            writeln!(self.writer, "[C] Clear game")?;
            writeln!(self.writer, "[Q] Quit game")?;

            let Some(choice) = self.read_line()? else {
                info!("Console input closed");
                return Ok(ConsoleOutcome::InputClosed);
            };
            debug!(choice = %choice, "Menu choice");

            match choice.to_ascii_uppercase().as_str() {
                "M" => {
                    if let Err(e) = self.make_move(&mut game) {
                        if matches!(e.downcast_ref::<NimError>(), Some(NimError::InputClosed)) {
                            return Ok(ConsoleOutcome::InputClosed);
                        }
                        return Err(e);
                    }
                }
                "S" => match game.save_game() {
                    Ok(()) => writeln!(self.writer, "The Game of 1-2 Nim is saved!")?,
                    Err(e) => writeln!(self.writer, "An error occurred while saving the game: {e}")?,
                },
                "L" => match game.load_game() {
                    Ok(()) => {
                        writeln!(self.writer, "The Game of 1-2 Nim is loaded!")?;
                        self.show_turn(&game)?;
                        self.show_marbles(&game)?;
                    }
                    Err(e) => writeln!(self.writer, "An error occurred while loading the game: {e}")?,
                },
                "U" => {
                    if game.undo_last_move() {
                        writeln!(self.writer, "Undo last move!")?;
                        self.show_turn(&game)?;
                        self.show_marbles(&game)?;
                    } else {
                        writeln!(self.writer, "No moves to undo")?;
                    }
                }
                "C" => {
                    writeln!(self.writer, "Reset the Game of 1-2 Nim")?;
                    writeln!(self.writer, "------------------------------")?;
                    self.strategy_menu()?;
                    let Some(code) = self.read_line()? else {
                        return Ok(ConsoleOutcome::InputClosed);
                    };
                    match game.reset_game(&code) {
                        Ok(choice) => {
                            writeln!(self.writer, "You selected {} computer strategy.", choice.label())?;
                            writeln!(self.writer)?;
                            self.announce_start(&game)?;
                        }
                        Err(_) => writeln!(self.writer, "Invalid strategy, game unchanged.")?,
                    }
                }
                "Q" => {
                    writeln!(self.writer, "Thank you for playing! Exiting game...")?;
                    return Ok(ConsoleOutcome::Quit);
                }
                _ => writeln!(self.writer, "Invalid choice. Please select again.")?,
            }
        }

        let winner = game.winner_name().unwrap_or_default().to_string();
        info!(%winner, "Console game finished");
        writeln!(self.writer, "*** {winner} is the winner! ***")?;
        Ok(ConsoleOutcome::Finished(winner))
    }

    /// Plays the side to move, then the other side unless that ended the game.
    fn make_move(&mut self, game: &mut NimGame) -> Result<()> {
        self.play_one(game)?;
        if !game.is_game_over() {
            self.play_one(game)?;
        }
        Ok(())
    }

    fn play_one(&mut self, game: &mut NimGame) -> Result<()> {
        let name = game.player(game.turn()).name().to_string();
        writeln!(self.writer)?;
        writeln!(self.writer, "It is {name}'s turn to play.")?;

        let amount = match game.turn() {
            Turn::Human => {
                let input = ConsoleMoveInput::new(&mut self.reader, &mut self.writer);
                let amount = InteractiveStrategy::new(input).next_move(game.marble_size())?;
                game.assign_move(amount)?;
                amount
            }
            Turn::Computer => *game.play_turn()?.amount(),
        };

        let noun = if amount == 1 { "marble" } else { "marbles" };
        writeln!(self.writer, "{name} takes {amount} {noun}.")?;
        self.show_marbles(game)
    }

    fn announce_start(&mut self, game: &NimGame) -> Result<()> {
        let first = game.player(game.turn()).name().to_string();
        writeln!(self.writer, "First turn: {first}")?;
        writeln!(self.writer, "Initial number of marbles: {}", game.marble_size())?;
        self.show_marbles(game)
    }

    fn show_turn(&mut self, game: &NimGame) -> Result<()> {
        let name = game.player(game.turn()).name().to_string();
        writeln!(self.writer, "It is {name}'s turn to play")?;
        Ok(())
    }

    fn show_marbles(&mut self, game: &NimGame) -> Result<()> {
        writeln!(self.writer, "Current number of marbles: {}", game.marble_size())?;
        writeln!(self.writer, "{}", marble_rows(game.marble_size()))?;
        Ok(())
    }
}

/// Draws the pile as `@ ` marks, ten to a row.
pub fn marble_rows(count: u32) -> String {
    let mut out = String::new();
    for i in 1..=count {
        out.push_str("@ ");
        if i % 10 == 0 && i < count {
            out.push('\n');
        }
    }
    out
}

fn read_trimmed<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Move prompts for the human player, over the console's own streams.
#[derive(new)]
struct ConsoleMoveInput<'a, R, W> {
    reader: &'a mut R,
    writer: &'a mut W,
}

impl<R: BufRead, W: Write> MoveInput for ConsoleMoveInput<'_, R, W> {
    fn request_move(&mut self, _pile_size: u32) -> Result<u32, NimError> {
        loop {
            write!(self.writer, "How many marbles do you want to remove? (1 or 2): ")
                .and_then(|()| self.writer.flush())
                .map_err(|_| NimError::InputClosed)?;

            let line = match read_trimmed(&mut *self.reader) {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => return Err(NimError::InputClosed),
            };

            match line.parse::<i64>() {
                // Integers outside u32 are never 1 or 2; 0 gets the same rejection.
                Ok(amount) => return Ok(u32::try_from(amount).unwrap_or(0)),
                Err(_) => {
                    let _ = writeln!(self.writer, "Oi! Please type a number.");
                }
            }
        }
    }

    fn reject(&mut self, _amount: u32, reason: MoveRejection) {
        let _ = writeln!(self.writer, "Oi! {reason}");
    }
}
