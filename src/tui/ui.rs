//! Stateless UI rendering for the Nim terminal UI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::App;

const MARBLE: &str = "● ";
const HELP: &str = "[R] Random  [Y] Alternating  [1]/[2] Remove  [U] Undo  [S] Save  [L] Load  [Q] Quit";

/// Renders the whole screen from application state.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Turn and count
            Constraint::Min(3),    // Marbles
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Strictly Nim - The Game of 1-2 Nim")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let (turn_text, count_text) = match app.game() {
        Some(game) if game.is_game_over() => (
            "Turn: -".to_string(),
            "Current number of marbles: 0".to_string(),
        ),
        Some(game) => (
            format!("Turn: {} Player", game.player(game.turn()).name()),
            format!("Current number of marbles: {}", game.marble_size()),
        ),
        None => ("Turn: ".to_string(), "Current number of marbles: ".to_string()),
    };
    let info = Paragraph::new(vec![Line::from(turn_text), Line::from(count_text)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(info, chunks[1]);

    let marbles = app.game().map(|g| g.marble_size()).unwrap_or(0);
    let pile = Paragraph::new(Line::from(Span::styled(
        MARBLE.repeat(marbles as usize),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().title("Marbles").borders(Borders::ALL));
    frame.render_widget(pile, chunks[2]);

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[4]);
}
