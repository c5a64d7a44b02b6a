use crate::errors::ConfigError;
use crate::trainer::INITIAL_PARTY_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

/// Runtime settings of the game. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub data_path: PathBuf,
    pub log_path: PathBuf,
    pub leaderboard_path: PathBuf,
    pub trainer_name: String,
    pub party_size: usize,
    pub start_delay_ms: u64,
    pub turn_delay_ms: u64,
    pub log_level: String,
    pub seed: Option<u64>,
    /// Wipe the leaderboard before recording a new result.
    pub replace_results_on_insert: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/pokemons_data.json"),
            log_path: PathBuf::from("logs/pokemons_log.txt"),
            leaderboard_path: PathBuf::from("data/leaderboard.ron"),
            trainer_name: "Ash Ketchum".to_string(),
            party_size: INITIAL_PARTY_SIZE,
            start_delay_ms: 2000,
            turn_delay_ms: 1000,
            log_level: "info".to_string(),
            seed: None,
            replace_results_on_insert: false,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(content)?;
        config.level()?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    /// Drop the pacing delays, for scripted or quick runs.
    pub fn without_delays(mut self) -> Self {
        self.start_delay_ms = 0;
        self.turn_delay_ms = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.trainer_name, "Ash Ketchum");
        assert_eq!(config.party_size, 3);
        assert_eq!(config.start_delay(), Duration::from_millis(2000));
        assert_eq!(config.level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = GameConfig::from_ron(r#"(trainer_name: "Misty", seed: Some(42))"#).unwrap();

        assert_eq!(config.trainer_name, "Misty");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.data_path, PathBuf::from("data/pokemons_data.json"));
    }

    #[rstest]
    #[case("debug", Level::DEBUG)]
    #[case("WARN", Level::WARN)]
    #[case("trace", Level::TRACE)]
    fn test_log_levels(#[case] name: &str, #[case] expected: Level) {
        let config = GameConfig {
            log_level: name.to_string(),
            ..GameConfig::default()
        };
        assert_eq!(config.level().unwrap(), expected);
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let result = GameConfig::from_ron(r#"(log_level: "loud")"#);
        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(level)) if level == "loud"));
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            GameConfig::from_ron("(party_size: \"three\")"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_without_delays() {
        let config = GameConfig::default().without_delays();
        assert_eq!(config.turn_delay(), Duration::ZERO);
        assert_eq!(config.start_delay(), Duration::ZERO);
    }
}
