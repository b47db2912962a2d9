//! Core Connect Four game logic: board representation, player types, the
//! game state machine with immutable transitions, and the controller that
//! owns the live state and times the drop animation.

mod board;
mod controller;
mod player;
mod state;

pub use board::{Board, Cell, Position, WinningLine, COLS, ROWS, WIN_LENGTH};
pub use controller::{Game, GameConfig, MAX_DROP_DELAY};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError, PendingDrop};
