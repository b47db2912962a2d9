use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::{GameOutcome, GameState};

/// Longest drop animation a [`Game`] will wait for.
pub const MAX_DROP_DELAY: Duration = Duration::from_secs(5);

/// Game timing, loaded from the `[game]` config section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How long a dropped token takes to land, in milliseconds.
    pub drop_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { drop_delay_ms: 400 }
    }
}

impl GameConfig {
    pub fn drop_delay(&self) -> Duration {
        Duration::from_millis(self.drop_delay_ms)
    }
}

/// Owns the single live [`GameState`] and drives it from input events.
///
/// Invalid input is ignored: a rejected move leaves the state untouched and
/// is only logged. The state is always replaced wholesale, never edited in
/// place.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    drop_delay: Duration,
}

impl Game {
    /// Delays longer than [`MAX_DROP_DELAY`] are clamped to it.
    pub fn new(drop_delay: Duration) -> Self {
        Game {
            state: GameState::initial(),
            drop_delay: drop_delay.min(MAX_DROP_DELAY),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.drop_delay())
    }

    /// Current state, for rendering.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn drop_delay(&self) -> Duration {
        self.drop_delay
    }

    /// Try to drop the current player's token into `column`.
    pub fn attempt_move(&mut self, column: usize, now: Instant) {
        match self.state.begin_move(column, now, self.drop_delay) {
            Ok(next) => {
                debug!(
                    player = %self.state.current_player(),
                    column,
                    "drop started"
                );
                self.state = next;
            }
            Err(err) => {
                debug!(column, reason = %err, "move ignored");
            }
        }
    }

    /// Land the pending drop once its delay has elapsed.
    ///
    /// Returns true if the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(next) = self.state.complete_drop(now) else {
            return false;
        };

        match next.outcome() {
            Some(GameOutcome::Winner { player, line }) => {
                info!(winner = %player, ?line, "game won");
            }
            Some(GameOutcome::Draw) => info!("game drawn"),
            None => debug!(next = %next.current_player(), "drop landed"),
        }

        self.state = next;
        true
    }

    /// Throw away the current game, including any drop still in flight.
    pub fn reset(&mut self) {
        if let Some(pending) = self.state.pending() {
            debug!(column = pending.position.col, "pending drop cancelled");
        }
        self.state = GameState::initial();
        info!("new game");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
