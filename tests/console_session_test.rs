//! Scripted console sessions.

use std::fs;

use strictly_nim::{ComputerStrategy, GameState};
use strictly_nim_games::{run_console, ConsoleOutcome, NimConfig};
use tempfile::TempDir;

/// Runs a session with the save file inside `dir`, returning outcome and output.
fn play(dir: &TempDir, strategy: Option<ComputerStrategy>, script: &str) -> (ConsoleOutcome, String) {
    let config = NimConfig::default().with_save_path(dir.path().join("save.txt"));
    let mut output = Vec::new();
    let outcome =
        run_console(script.as_bytes(), &mut output, &config, strategy).expect("Console failed");
    (outcome, String::from_utf8(output).expect("Output not UTF-8"))
}

#[test]
fn test_invalid_opening_strategy_exits() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, None, "Z\n");
    assert_eq!(outcome, ConsoleOutcome::InvalidStrategy);
    assert!(output.contains("Invalid option. Exiting."));
}

#[test]
fn test_prompted_strategy_then_quit() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, None, "y\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("You selected Alternating computer strategy."));
    assert!(output.contains("Initial number of marbles:"));
    assert!(output.contains("Thank you for playing!"));
}

#[test]
fn test_always_taking_one_finishes_game() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let script = "M\n1\n".repeat(25);
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Random), &script);

    let ConsoleOutcome::Finished(winner) = outcome else {
        panic!("Game should finish, got {outcome:?}");
    };
    assert!(winner == "Human" || winner == "Computer");
    assert!(output.contains(&format!("*** {winner} is the winner! ***")));
}

#[test]
fn test_illegal_amount_reprompts() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Alternating), "M\n5\n1\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("Oi! You can only remove 1 or 2 marbles!"));
    assert!(output.contains("Human takes 1 marble."));
}

#[test]
fn test_input_ending_mid_move() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, _) = play(&dir, Some(ComputerStrategy::Alternating), "M\n");
    assert_eq!(outcome, ConsoleOutcome::InputClosed);
}

#[test]
fn test_undo_at_start_is_informational() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Random), "U\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("No moves to undo"));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Alternating), "M\n1\nS\nL\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("The Game of 1-2 Nim is saved!"));
    assert!(output.contains("The Game of 1-2 Nim is loaded!"));

    let text = fs::read_to_string(dir.path().join("save.txt")).expect("Save file missing");
    let states: Vec<GameState> = text.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(states.len(), 3, "base state plus one human and one computer move");
}

#[test]
fn test_load_without_save_file_reports() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Random), "L\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("An error occurred while loading the game"));
}

#[test]
fn test_clear_with_bad_code_keeps_game() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Random), "C\nx\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("Invalid strategy, game unchanged."));
}

#[test]
fn test_clear_switches_strategy() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (outcome, output) = play(&dir, Some(ComputerStrategy::Random), "C\ny\nQ\n");
    assert_eq!(outcome, ConsoleOutcome::Quit);
    assert!(output.contains("You selected Random computer strategy."));
    assert!(output.contains("You selected Alternating computer strategy."));
    assert_eq!(output.matches("Initial number of marbles:").count(), 2);
}

#[test]
fn test_unknown_menu_choice() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (_, output) = play(&dir, Some(ComputerStrategy::Random), "?\nQ\n");
    assert!(output.contains("Invalid choice. Please select again."));
}
