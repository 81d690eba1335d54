//! Engine configuration.
//!
//! Settings normally come from a settings store outside the engine. They
//! can also be read from TOML:
//!
//! ```toml
//! default_towing_cost = 500
//! intelligence_level = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::scoring::IntelligenceLevel;

/// Default towing cost reference (dollars).
pub const DEFAULT_TOWING_COST: u64 = 500;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reference tow cost; the cost factor scores a tow of twice this
    /// amount near the bottom of its range.
    pub default_towing_cost: u64,
    /// Scoring aggressiveness (1..=5).
    pub intelligence_level: IntelligenceLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_towing_cost: DEFAULT_TOWING_COST,
            intelligence_level: IntelligenceLevel::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the intelligence level.
    pub fn with_intelligence_level(mut self, level: IntelligenceLevel) -> Self {
        self.intelligence_level = level;
        self
    }

    /// Sets the towing cost reference.
    pub fn with_default_towing_cost(mut self, cost: u64) -> Self {
        self.default_towing_cost = cost;
        self
    }

    /// Loads and validates a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the type system doesn't cover.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_towing_cost == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_towing_cost".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
