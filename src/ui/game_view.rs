use std::time::Instant;

use crate::game::{Cell, GameOutcome, GameState, Player, Position, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TOKEN: &str = " ● ";
const WINNING_TOKEN: &str = " ◆ ";

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    now: Instant,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, selected_column, now, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

pub(super) fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let (status, color) = match game_state.outcome() {
        Some(GameOutcome::Winner { player, .. }) => {
            (format!("{} wins!", player.name()), player_color(player))
        }
        Some(GameOutcome::Draw) => ("Draw".to_string(), Color::White),
        None => {
            let player = game_state.current_player();
            let mut status = format!("Current Player: {}", player.name());
            if game_state.is_locked() {
                status.push_str("  (dropping)");
            }
            (status, player_color(player))
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

/// Row the falling token is drawn at, interpolated from the top of the board.
fn falling_row(game_state: &GameState, now: Instant) -> Option<Position> {
    let pending = game_state.pending()?;
    let target = pending.position;
    let row = (pending.progress(now) * target.row as f32).round() as usize;
    Some(Position::new(row.min(target.row), target.col))
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    now: Instant,
    area: Rect,
) {
    let board = game_state.board();
    let mover_color = player_color(game_state.current_player());
    let falling = falling_row(game_state, now);
    let winning_line = game_state.winning_line();
    let legal = game_state.legal_columns();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        let style = if !legal.contains(&col) {
            Style::default().fg(Color::DarkGray)
        } else if col == selected_column {
            Style::default()
                .fg(mover_color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        col_line.push(Span::styled(label, style));
    }
    col_line.push(Span::raw(" ")); // Suffix padding to match "║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔═════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let pos = Position::new(row, col);
            let span = if falling == Some(pos) {
                Span::styled(TOKEN, Style::default().fg(mover_color))
            } else {
                match board.get(row, col) {
                    Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                    Cell::Red => token_span(Player::Red, winning_line.contains(&pos)),
                    Cell::Yellow => token_span(Player::Yellow, winning_line.contains(&pos)),
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column && !game_state.is_terminal() {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(mover_color)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw(" "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn token_span(player: Player, winning: bool) -> Span<'static> {
    let style = Style::default().fg(player_color(player));
    if winning {
        Span::styled(
            WINNING_TOKEN,
            style.add_modifier(Modifier::BOLD | Modifier::RAPID_BLINK),
        )
    } else {
        Span::styled(TOKEN, style)
    }
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter or 1-7: Drop  |  R: Restart  |  Esc: Menu  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
