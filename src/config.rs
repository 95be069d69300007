use std::num::NonZero;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    BoardSize, DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_REPLAY_DELAY_MS, MAX_ZOOM, MIN_ZOOM,
};

/// Settings read from an optional JSON file. Missing keys fall back to the
/// defaults in `core::consts`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_rows: usize,
    pub board_cols: usize,
    pub history_capacity: usize,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub replay_delay_ms: u64,
    pub poll_interval_ms: u64,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("cannot read config: {_0}")]
    Io(#[from] std::io::Error),
    #[display("cannot parse config: {_0}")]
    Json(#[from] serde_json::Error),
    #[display("invalid config: {reason}")]
    Invalid { reason: &'static str },
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_rows: DEFAULT_BOARD_ROWS,
            board_cols: DEFAULT_BOARD_COLS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            replay_delay_ms: DEFAULT_REPLAY_DELAY_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<GameConfig, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.board_rows == 0 || self.board_cols == 0 {
            return Err(ConfigError::Invalid {
                reason: "board dimensions must be positive",
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                reason: "history_capacity must be positive",
            });
        }
        if self.min_zoom == 0 || self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid {
                reason: "zoom range must satisfy 1 <= min_zoom <= max_zoom",
            });
        }
        Ok(())
    }

    pub fn board_size(&self) -> BoardSize {
        BoardSize::new(self.board_rows, self.board_cols)
    }

    pub fn history_capacity(&self) -> NonZero<usize> {
        NonZero::new(self.history_capacity).unwrap_or(NonZero::<usize>::MIN)
    }

    pub fn replay_delay(&self) -> Duration {
        Duration::from_millis(self.replay_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
