use crate::game::Player;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::game_view::player_color;

/// Start screen shown before the first game and after leaving one.
pub fn render(frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(frame.area());

    let bold = |player: Player| {
        Span::styled(
            player.name(),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CONNECT FOUR",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Two players take turns dropping tokens into the grid."),
        Line::from("Line up four tokens in any direction to win."),
        Line::from(""),
        Line::from(vec![
            bold(Player::Red),
            Span::raw(" moves first, then "),
            bold(Player::Yellow),
            Span::raw("."),
        ]),
    ];

    let intro = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(intro, chunks[0]);

    let controls = Paragraph::new("Enter: Start  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_menu_renders_start_hint() {
        let mut terminal = Terminal::new(TestBackend::new(70, 16)).unwrap();
        terminal.draw(render).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("CONNECT FOUR"));
        assert!(screen.contains("Enter: Start"));
    }
}
