//! Game configuration.
//!
//! All fields have defaults matching the classic 4x4 game, so a config file
//! only needs the keys it changes:
//!
//! ```
//! use number_tiles::config::GameConfig;
//! let cfg = GameConfig::from_json_str(r#"{ "dimension": 5 }"#).unwrap();
//! assert_eq!(cfg.dimension, 5);
//! assert_eq!(cfg.threshold, 2048);
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::Tile;
use crate::error::ConfigError;

/// Configurable knobs for a game session.
///
/// - `dimension`: side length of the square board.
/// - `threshold`: tile value that counts as a win.
/// - `max_commands`: pending move capacity; moves past it are dropped.
/// - `settle_delay_ms`: pause after a mutating move before the queue drains again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub dimension: usize,
    pub threshold: Tile,
    pub max_commands: usize,
    pub settle_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { dimension: 4, threshold: 2048, max_commands: 100, settle_delay_ms: 300 }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension < 2 {
            return Err(ConfigError::Dimension(self.dimension));
        }
        if self.threshold < 8 {
            return Err(ConfigError::Threshold(self.threshold));
        }
        if self.max_commands == 0 {
            return Err(ConfigError::QueueCapacity);
        }
        Ok(())
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration { Duration::from_millis(self.settle_delay_ms) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.settle_delay(), Duration::from_millis(300));
    }

    #[test]
    fn rejects_bad_values() {
        let small = GameConfig { dimension: 1, ..GameConfig::default() };
        assert!(matches!(small.validate(), Err(ConfigError::Dimension(1))));

        let low = GameConfig { threshold: 4, ..GameConfig::default() };
        assert!(matches!(low.validate(), Err(ConfigError::Threshold(4))));

        let no_queue = GameConfig { max_commands: 0, ..GameConfig::default() };
        assert!(matches!(no_queue.validate(), Err(ConfigError::QueueCapacity)));
    }

    #[test]
    fn json_errors_surface() {
        assert!(matches!(GameConfig::from_json_str("{ not json"), Err(ConfigError::Json(_))));
        assert!(matches!(GameConfig::from_json_str(r#"{ "dimension": 0 }"#), Err(ConfigError::Dimension(0))));
    }

    #[test]
    fn load_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "threshold": 512, "settle_delay_ms": 0 }}"#).unwrap();
        let cfg = GameConfig::load(tmp.path()).unwrap();
        assert_eq!(cfg.threshold, 512);
        assert_eq!(cfg.settle_delay(), Duration::ZERO);
        assert_eq!(cfg.dimension, 4);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
