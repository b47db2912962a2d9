use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{GameConfig, COLS, MAX_DROP_DELAY};
use crate::logging::LoggingConfig;
use crate::ui::UiConfig;

/// Longest drop animation accepted from config.
const MAX_DROP_DELAY_MS: u64 = MAX_DROP_DELAY.as_millis() as u64;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse a TOML file without validating it, so overrides can still be
    /// applied before [`AppConfig::validate`] runs.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::read`], falling back to defaults if the file does not
    /// exist. The result is not validated.
    pub fn read_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::read(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides on top of the file values.
    pub fn apply_overrides(&mut self, drop_delay_ms: Option<u64>, log_file: Option<PathBuf>) {
        if let Some(delay) = drop_delay_ms {
            self.game.drop_delay_ms = delay;
        }
        if let Some(path) = log_file {
            self.logging.file = path;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.drop_delay_ms > MAX_DROP_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "game.drop_delay_ms must be <= {MAX_DROP_DELAY_MS}"
            )));
        }
        if self.ui.tick_rate_ms == 0 || self.ui.tick_rate_ms > 1_000 {
            return Err(ConfigError::Validation(
                "ui.tick_rate_ms must be in [1, 1000]".into(),
            ));
        }
        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {COLS}"
            )));
        }
        if self.logging.level_filter().is_none() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid level",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
