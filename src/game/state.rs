use std::time::{Duration, Instant};

use super::board::{Board, Position, WinningLine, COLS};
use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner { player: Player, line: WinningLine },
    Draw,
}

/// Why a move attempt produced no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("game is over")]
    GameOver,
    #[error("a drop is still in progress")]
    MoveInProgress,
}

/// A move that has been accepted but not yet applied to the board.
///
/// The landing cell is resolved when the move is accepted; the token is
/// written once `due` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDrop {
    pub player: Player,
    pub position: Position,
    started: Instant,
    due: Instant,
}

impl PendingDrop {
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Fraction of the drop delay that has elapsed, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let total = self.due.saturating_duration_since(self.started);
        if total.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    pending: Option<PendingDrop>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            outcome: None,
            pending: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(GameOutcome::Winner { player, .. }) => Some(player),
            _ => None,
        }
    }

    /// Cells of the winning line, empty unless the game was won.
    pub fn winning_line(&self) -> &[Position] {
        match &self.outcome {
            Some(GameOutcome::Winner { line, .. }) => line.as_slice(),
            _ => &[],
        }
    }

    /// The drop currently animating, if any.
    pub fn pending(&self) -> Option<&PendingDrop> {
        self.pending.as_ref()
    }

    /// True while a drop is animating and new moves are refused.
    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    /// Columns that would accept a move right now.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() || self.is_locked() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Accept a move in `column`, returning the locked state that waits
    /// `delay` before the token lands.
    ///
    /// A delay too large for the clock to represent lands on the next poll.
    pub fn begin_move(
        &self,
        column: usize,
        now: Instant,
        delay: Duration,
    ) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.is_locked() {
            return Err(MoveError::MoveInProgress);
        }

        let row = self.board.landing_row(column)?;

        Ok(GameState {
            pending: Some(PendingDrop {
                player: self.current_player,
                position: Position::new(row, column),
                started: now,
                due: now.checked_add(delay).unwrap_or(now),
            }),
            ..*self
        })
    }

    /// Land the pending drop if its delay has elapsed.
    ///
    /// Returns `None` when nothing is pending or the drop is not due yet.
    pub fn complete_drop(&self, now: Instant) -> Option<GameState> {
        let pending = self.pending.filter(|p| p.is_due(now))?;
        Some(self.land(pending))
    }

    fn land(&self, pending: PendingDrop) -> GameState {
        let PendingDrop {
            player, position, ..
        } = pending;
        let board = self.board.with_piece(position, player.to_cell());

        let (outcome, current_player) =
            if let Some(line) = board.winning_line(position.row, position.col) {
                (Some(GameOutcome::Winner { player, line }), player)
            } else if board.is_full() {
                (Some(GameOutcome::Draw), player)
            } else {
                (None, player.other())
            };

        GameState {
            board,
            current_player,
            outcome,
            pending: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
