//! Configuration for the state store.
//!
//! Layered loading, lowest to highest priority: serde defaults, an optional
//! TOML file (`statestore.toml` by convention, or an explicit path), then
//! `STATESTORE_*` environment variable overrides.

use crate::error::StoreError;
use crate::logging::LoggingConfig;
use crate::store::Store;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding state files (must exist; not created by the store)
    #[serde(default = "default_states_dir")]
    pub states_dir: PathBuf,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_states_dir() -> PathBuf {
    PathBuf::from("states")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            states_dir: default_states_dir(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the conventional sources.
    ///
    /// With `file` set, that file is required; otherwise `statestore.toml`
    /// in the working directory is used when present. Environment variables
    /// prefixed `STATESTORE_` override file values either way (e.g.
    /// `STATESTORE_STATES_DIR=/var/lib/states`).
    pub fn load(file: Option<&Path>) -> Result<Self, StoreError> {
        let mut builder = Config::builder();

        builder = match file {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name("statestore").required(false)),
        };

        builder = builder.add_source(Environment::with_prefix("STATESTORE").separator("__"));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Open the named state from the configured states directory.
    pub fn open(&self, state: &str) -> Result<Store, StoreError> {
        Store::open(&self.states_dir, state)
    }
}
