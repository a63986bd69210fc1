//! Configuration Types
//!
//! All configuration structures with sensible defaults. Every section can
//! be overridden from `docloom.toml` or `DOCLOOM_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ai::ClientConfig;
use crate::constants::orchestrator::{DEFAULT_DISPATCH_WORKERS, DEFAULT_RUN_WORKERS};
use crate::types::{DocError, ModelSelection, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Project-specific settings
    pub project: ProjectConfig,

    /// Generation service settings
    pub llm: ClientConfig,

    /// Model selection per hierarchy level
    pub models: ModelSelection,

    /// Run concurrency settings
    pub orchestrator: OrchestratorSettings,

    /// Persistence settings
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            project: ProjectConfig::default(),
            llm: ClientConfig::default(),
            models: ModelSelection::default(),
            orchestrator: OrchestratorSettings::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(DocError::Config(format!(
                    "llm temperature must be between 0.0 and 2.0, got {}",
                    temperature
                )));
            }
        }

        if self.llm.timeout_secs == 0 {
            return Err(DocError::Config(
                "llm timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.orchestrator.entry_workers == 0 || self.orchestrator.dispatch_workers == 0 {
            return Err(DocError::Config(
                "orchestrator worker counts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Project Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name (defaults to the root directory name at run time)
    pub name: Option<String>,
}

// =============================================================================
// Orchestrator Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Worker cap for the root folder's fan-out pools
    pub entry_workers: usize,

    /// Worker cap for fan-out pools below the root
    pub dispatch_workers: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            entry_workers: DEFAULT_RUN_WORKERS,
            dispatch_workers: DEFAULT_DISPATCH_WORKERS,
        }
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file path
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("documentation.db"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = Config::default();
        config.llm.temperature = Some(3.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.orchestrator.dispatch_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_models() {
        let config = Config::default();
        assert_eq!(config.models.file_model, "llama-3.1-8b-instant");
        assert_eq!(config.models.folder_model, "llama-3.3-70b-versatile");
    }
}
