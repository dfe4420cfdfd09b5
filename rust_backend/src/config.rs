//! Evaluation configuration file support.
//!
//! Settings are read from TOML. Every key is optional and falls back to the
//! library defaults:
//!
//! ```toml
//! [skill]
//! resample_count = 500
//! monte_carlo_draws = 500
//! random_seed = 0
//!
//! [hit_test]
//! magnitude_filter = "at_least_minimum"   # or "ignore"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::{HitTestOptions, SkillOptions};
use crate::error::{SkillError, SkillResult};

/// Complete evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    #[serde(default)]
    pub skill: SkillOptions,
    #[serde(default)]
    pub hit_test: HitTestOptions,
}

impl SkillConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SkillConfig)` if the file was read, parsed and validated
    /// * `Err(SkillError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> SkillResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SkillError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> SkillResult<Self> {
        let config: SkillConfig = toml::from_str(content).map_err(|e| {
            SkillError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `skill.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(SkillConfig))` if found and parsed successfully
    /// * `Ok(None)` if no file exists in any of the locations
    pub fn from_default_location() -> SkillResult<Option<Self>> {
        let search_paths = [
            PathBuf::from("skill.toml"),
            PathBuf::from("rust_backend/skill.toml"),
            PathBuf::from("../skill.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    pub fn validate(&self) -> SkillResult<()> {
        self.skill
            .validate()
            .map_err(|e| SkillError::Configuration(e.to_string()))
    }

    /// Serialize back to TOML, e.g. to record the settings next to a report.
    pub fn to_toml_string(&self) -> SkillResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SkillError::Configuration(format!("Failed to serialize config: {}", e)))
    }
}
