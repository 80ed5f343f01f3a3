use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::error::ConfigError;
use crate::persistence::PersistenceConfig;
use crate::tracker::{ScoringConfig, TrackerConfig};

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "BINSIGHT_CONFIG";

/// Everything tunable about classification, smoothing, tracking and scoring.
///
/// Every section and field is optional in the file; missing values fall
/// back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingConfig {
    pub classifier: ClassifierConfig,
    pub persistence: PersistenceConfig,
    pub tracker: TrackerConfig,
    pub scoring: ScoringConfig,
}

impl SortingConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: SortingConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from the file named by `BINSIGHT_CONFIG`, or use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate()?;
        self.persistence.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}
