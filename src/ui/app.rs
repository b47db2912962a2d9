use crate::game::{Game, GameOutcome, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

/// Terminal settings, loaded from the `[ui]` config section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval; also bounds how late a drop can land.
    pub tick_rate_ms: u64,
    /// Column the cursor starts on in a new game.
    pub start_column: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            tick_rate_ms: 33,
            start_column: 3, // Middle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
}

pub struct App {
    game: Game,
    config: UiConfig,
    screen: Screen,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game: Game, config: UiConfig) -> Self {
        let selected_column = config.start_column.min(COLS - 1);
        App {
            game,
            config,
            screen: Screen::Menu,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let now = Instant::now();
            self.on_tick(now);
            terminal.draw(|f| self.render(f, now))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.config.tick_rate_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Land a finished drop and announce the result if the game ended.
    pub fn on_tick(&mut self, now: Instant) {
        if !self.game.poll(now) {
            return;
        }

        if let Some(outcome) = self.game.state().outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner { player, .. } => format!("{} wins!", player.name()),
                GameOutcome::Draw => "It's a draw!".to_string(),
            });
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Playing => self.handle_game_key(key, now),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.start_new_game();
                self.screen = Screen::Playing;
                info!("game started");
            }
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.game.reset();
                self.screen = Screen::Menu;
                info!("returned to start screen");
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                // The cursor stays put until the falling token lands.
                if !self.game.state().is_locked() {
                    self.selected_column = c as usize - '1' as usize;
                }
                self.drop_piece(now);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(now);
            }
            KeyCode::Char('r') => {
                self.start_new_game();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn start_new_game(&mut self) {
        self.game.reset();
        self.selected_column = self.config.start_column.min(COLS - 1);
        self.message = None;
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self, now: Instant) {
        let state = self.game.state();
        if state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if state.is_locked() {
            self.message = Some("Wait for the token to land.".to_string());
            return;
        }
        if state.board().is_column_full(self.selected_column) {
            self.message = Some("Column is full!".to_string());
            return;
        }

        self.game.attempt_move(self.selected_column, now);
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame, now: Instant) {
        match self.screen {
            Screen::Menu => super::menu_view::render(frame),
            Screen::Playing => super::game_view::render(
                frame,
                self.game.state(),
                self.selected_column,
                &self.message,
                now,
            ),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Game::default(), UiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, GameState, Player};
    use crossterm::event::KeyModifiers;

    const DELAY: Duration = Duration::from_millis(400);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn playing_app() -> App {
        let mut app = App::new(Game::new(DELAY), UiConfig::default());
        app.handle_key(key(KeyCode::Enter), Instant::now());
        app
    }

    #[test]
    fn test_starts_on_menu() {
        let app = App::default();
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.selected_column(), 3);
    }

    #[test]
    fn test_menu_enter_starts_game() {
        let app = playing_app();
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.game().state(), &GameState::initial());
    }

    #[test]
    fn test_menu_quit() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('q')), Instant::now());
        assert!(app.should_quit());
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = playing_app();
        let now = Instant::now();
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Left), now);
        }
        assert_eq!(app.selected_column(), 0);
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Right), now);
        }
        assert_eq!(app.selected_column(), COLS - 1);
    }

    #[test]
    fn test_number_key_drops_and_tick_lands() {
        let mut app = playing_app();
        let now = Instant::now();

        app.handle_key(key(KeyCode::Char('2')), now);
        assert_eq!(app.selected_column(), 1);
        assert!(app.game().state().is_locked());

        // Second drop while the first is falling is ignored.
        app.handle_key(key(KeyCode::Char('5')), now);
        assert_eq!(app.selected_column(), 1);
        assert_eq!(app.message(), Some("Wait for the token to land."));
        app.on_tick(now + DELAY);

        let state = app.game().state();
        assert_eq!(state.board().get(5, 1), Cell::Red);
        assert_eq!(state.board().get(5, 4), Cell::Empty);
        assert_eq!(state.current_player(), Player::Yellow);
    }

    #[test]
    fn test_win_message() {
        let mut app = playing_app();
        let mut now = Instant::now();
        for c in ['1', '2', '1', '2', '1', '2', '1'] {
            app.handle_key(key(KeyCode::Char(c)), now);
            now += DELAY;
            app.on_tick(now);
        }

        assert_eq!(app.game().state().winner(), Some(Player::Red));
        assert_eq!(app.message(), Some("Red wins!"));

        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));
    }

    #[test]
    fn test_full_column_message() {
        let mut app = playing_app();
        let mut now = Instant::now();
        for _ in 0..6 {
            app.handle_key(key(KeyCode::Enter), now);
            now += DELAY;
            app.on_tick(now);
        }

        let before = *app.game().state();
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.message(), Some("Column is full!"));
        assert_eq!(app.game().state(), &before);
    }

    #[test]
    fn test_enter_during_drop_reports_wait() {
        let mut app = playing_app();
        let now = Instant::now();

        app.handle_key(key(KeyCode::Enter), now);
        let locked = *app.game().state();
        assert!(locked.is_locked());

        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.message(), Some("Wait for the token to land."));
        assert_eq!(app.game().state(), &locked);

        // Once landed, number keys move the cursor again.
        app.on_tick(now + DELAY);
        app.handle_key(key(KeyCode::Char('7')), now + DELAY);
        assert_eq!(app.selected_column(), 6);
        assert!(app.game().state().is_locked());
    }

    #[test]
    fn test_restart_during_drop() {
        let mut app = playing_app();
        let now = Instant::now();

        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert!(app.game().state().is_locked());

        app.handle_key(key(KeyCode::Char('r')), now);
        assert_eq!(app.game().state(), &GameState::initial());
        assert_eq!(app.selected_column(), 3);
        assert_eq!(app.message(), Some("New game started!"));

        app.on_tick(now + DELAY);
        assert_eq!(app.game().state(), &GameState::initial());
    }

    #[test]
    fn test_escape_returns_to_menu_and_discards_game() {
        let mut app = playing_app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Enter), now);
        app.on_tick(now + DELAY);

        app.handle_key(key(KeyCode::Esc), now + DELAY);
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.game().state(), &GameState::initial());
        assert!(!app.should_quit());
    }
}
