//! Settings for the command-line front end.
//!
//! Supports configuration from:
//! - a TOML file
//! - environment variables (`BANDITSIM_*`), which take precedence
//!
//! ```toml
//! [simulation]
//! arm_count = 5
//! round_count = 1000
//! exploration_rate = 0.1
//! seed = 42
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};
use crate::simulation::SimulationConfig;

/// Main settings struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| BanditError::Config(format!("{key}={raw:?} is not a valid value"))),
        Err(_) => Ok(None),
    }
}

impl Settings {
    /// Parse TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BanditError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Apply `BANDITSIM_ARMS`, `BANDITSIM_ROUNDS`, `BANDITSIM_EPSILON`,
    /// `BANDITSIM_SEED` and `BANDITSIM_LOG` on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(v) = env_parse("BANDITSIM_ARMS")? {
            self.simulation.arm_count = v;
        }
        if let Some(v) = env_parse("BANDITSIM_ROUNDS")? {
            self.simulation.round_count = v;
        }
        if let Some(v) = env_parse("BANDITSIM_EPSILON")? {
            self.simulation.exploration_rate = v;
        }
        if let Some(v) = env_parse("BANDITSIM_SEED")? {
            self.simulation.seed = v;
        }
        if let Ok(level) = std::env::var("BANDITSIM_LOG") {
            self.logging.level = level;
        }
        Ok(self)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// File (or defaults when `path` is `None`), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml("[simulation]\narm_count = 4\n").unwrap();
        assert_eq!(s.simulation.arm_count, 4);
        assert_eq!(s.simulation.round_count, SimulationConfig::default().round_count);
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Settings::from_toml("[simulation\narm_count = ").unwrap_err();
        assert!(matches!(err, BanditError::Config(_)));
    }

    #[test]
    fn wrong_type_is_a_config_error() {
        let err = Settings::from_toml("[simulation]\narm_count = \"many\"\n").unwrap_err();
        assert!(matches!(err, BanditError::Config(_)));
    }
}
