//! User configuration for the `gitit` application.

use crate::{
    constants::GITIT_CFG_FILE_NAME,
    errors::{StError, StResult},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The user configuration, read from `~/.gitit.toml` unless another path is given.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StConfig {
    /// The remote to compare against and push to. When unset, `origin` is preferred, then the
    /// first configured remote.
    pub remote: Option<String>,
    /// Whether `status` lists the remote's references.
    pub query_remote: bool,
}

impl Default for StConfig {
    fn default() -> Self {
        Self {
            remote: None,
            query_remote: true,
        }
    }
}

impl StConfig {
    /// Returns the default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(GITIT_CFG_FILE_NAME))
    }

    /// Loads the configuration at `path`, falling back to the defaults if it does not exist.
    ///
    /// ## Takes
    /// - `path` - The configuration file. [None] if no location could be determined.
    ///
    /// ## Returns
    /// - `Ok(StConfig)` - The loaded or default configuration.
    /// - `Err(StError::Config)` - The file exists but could not be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> StResult<Self> {
        let Some(path) = path.filter(|p| p.exists()) else {
            debug!("No configuration file found, using defaults");
            return Ok(Self::default());
        };

        let config_err = |e: String| StError::Config(path.display().to_string(), e);
        let raw = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let config = toml::from_str(&raw).map_err(|e| config_err(e.to_string()))?;

        debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }
}
