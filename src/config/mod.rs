//! Configuration management for Murmur.
//!
//! Configuration is read from `~/.config/murmur/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::StoreBackend;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
}

/// Which storage backend holds the posts, and where.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Database or JSON file. Defaults to a file under the user data directory.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/murmur/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("murmur").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Murmur Configuration

[store]
# Where posts live:
# - "sqlite": SQLite database (default)
# - "file":   a single JSON document
# - "memory": nothing is kept between runs
backend = "sqlite"

# Database / JSON file location. When unset, murmur uses
# <data dir>/murmur/murmur.db or <data dir>/murmur/posts.json.
# path = "/home/me/.local/share/murmur/murmur.db"
"##
    }
}

impl StoreConfig {
    /// Configured path, or the backend's default file under the data directory.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        if self.path.is_some() {
            return Ok(self.path.clone());
        }

        match self.backend.default_file_name() {
            Some(name) => {
                let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
                let murmur_dir = data_dir.join("murmur");
                fs::create_dir_all(&murmur_dir).map_err(|e| ConfigError::Io {
                    path: murmur_dir.clone(),
                    source: e,
                })?;
                Ok(Some(murmur_dir.join(name)))
            }
            None => Ok(None),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
