//! Configuration loading and management
//!
//! Handles parsing of `.workdone.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::{DATA_DIR, DATA_FILE};

/// Name of the config file looked up in the base directory
pub const CONFIG_FILE: &str = ".workdone.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task file location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Interactive shell presentation
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the task file, relative to the base directory
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Task file name
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_data_dir() -> String {
    DATA_DIR.to_string()
}

fn default_file_name() -> String {
    DATA_FILE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Draw a horizontal rule around each shell response
    #[serde(default = "default_true")]
    pub frame: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { frame: true }
    }
}

impl StorageConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "storage.data_dir cannot be empty".to_string(),
            ));
        }
        let name = self.file_name.trim();
        if name.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "storage.file_name cannot be empty".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(crate::error::Error::InvalidConfig(format!(
                "storage.file_name must be a plain file name, got '{name}'"
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `.workdone.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the base directory, or return defaults
    pub fn load_from_dir(base_dir: &Path) -> Self {
        let config_path = base_dir.join(CONFIG_FILE);
        if config_path.exists() {
            match Self::load(&config_path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = %config_path.display(), error = %err, "ignoring config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the task file path for `base_dir`
    pub fn data_file(&self, base_dir: &Path) -> PathBuf {
        let dir = Path::new(self.storage.data_dir.trim());
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            base_dir.join(dir)
        };
        dir.join(self.storage.file_name.trim())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.storage.validate()
    }
}
