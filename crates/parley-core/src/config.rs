//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without
//! recompiling.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub negotiation: NegotiationConfig,
    pub demo: DemoConfig,
}

/// Negotiation protocol tuning
#[derive(Debug, Clone, Deserialize)]
pub struct NegotiationConfig {
    /// Most counter-offers an agent presents in one round
    pub max_counter_options: usize,
}

/// Demo agent generation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Number of actions in the demo alphabet
    pub alphabet_size: usize,
    /// Lowest utility a demo agent assigns to an action
    pub utility_min: i32,
    /// Highest utility a demo agent assigns to an action
    pub utility_max: i32,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("could not load {}: {}. using defaults", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            negotiation: NegotiationConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self { max_counter_options: 2 }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { alphabet_size: 26, utility_min: -5, utility_max: 5 }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.negotiation.max_counter_options, 2);
        assert_eq!(config.demo.alphabet_size, 26);
        assert!(config.demo.utility_min < config.demo.utility_max);
    }

    #[test]
    fn test_parse_tuning_toml() {
        let toml = r#"
            [negotiation]
            max_counter_options = 3

            [demo]
            alphabet_size = 10
            utility_min = -2
            utility_max = 2
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.negotiation.max_counter_options, 3);
        assert_eq!(config.demo.alphabet_size, 10);
    }
}
