//! Log setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// Logging settings, loaded from the `[logging]` config section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    /// Default level filter; `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("connect_four.log"),
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse `level` as a tracing level filter.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.level.parse().ok()
    }
}

/// Install the global subscriber, truncating the configured log file.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let file = File::create(&config.file).map_err(|source| LoggingError::FileCreate {
        path: config.file.clone(),
        source,
    })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(config.level_filter().unwrap_or(LevelFilter::INFO).into())
            .parse_lossy("")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_parses_known_levels() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.level_filter(), Some(LevelFilter::INFO));

        config.level = "debug".to_string();
        assert_eq!(config.level_filter(), Some(LevelFilter::DEBUG));

        config.level = "off".to_string();
        assert_eq!(config.level_filter(), Some(LevelFilter::OFF));
    }

    #[test]
    fn test_level_filter_rejects_garbage() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), None);
    }

    #[test]
    fn test_init_fails_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: dir.path().join("missing").join("game.log"),
            ..Default::default()
        };

        assert!(matches!(
            init(&config),
            Err(LoggingError::FileCreate { .. })
        ));
    }
}
