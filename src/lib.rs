//! # Connect Four
//!
//! Two-player Connect Four played in the terminal. The board, win detection
//! and the turn state machine live in [`game`]; the drop animation is a
//! pending move that lands once its delay has passed, and a reset discards
//! it along with the rest of the game.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, state machine, controller
//! - [`ui`]: Terminal UI: start screen, game view, key handling
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: File-backed tracing subscriber
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
