//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources:
//! 1. Built-in defaults (Serialized)
//! 2. Config file (docloom.toml in the working directory, or an explicit path)
//! 3. Environment variables (DOCLOOM_* prefix)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{DocError, Result};

const ENV_PREFIX: &str = "DOCLOOM_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults, then config file, then env vars.
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let file_path = Self::config_file_path();
        if file_path.exists() {
            debug!(path = %file_path.display(), "loading config file");
            figment = figment.merge(Toml::file(&file_path));
        }

        // Double underscore separates nesting levels so field names that
        // contain underscores survive, e.g.
        // DOCLOOM_MODELS__FILE_MODEL -> models.file_model
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| DocError::Config(format!("configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only (plus defaults).
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| DocError::Config(format!("configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Default config file location.
    pub fn config_file_path() -> PathBuf {
        PathBuf::from("docloom.toml")
    }
}
