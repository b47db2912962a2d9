//! Terminal UI: a start screen and the game view. Rendering is a pure
//! function of the game state; [`App`] only routes keys into the game.

mod app;
mod game_view;
mod menu_view;

pub use app::{App, Screen, UiConfig};
