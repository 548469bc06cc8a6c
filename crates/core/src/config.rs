//! Catalog 配置
//!
//! 支持 YAML 配置文件

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 配置加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// 存储配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing file holding the product array
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Pretty-print the JSON array on write
    #[serde(default)]
    pub pretty: bool,

    /// Write through a temporary file and rename over the target
    #[serde(default = "default_true")]
    pub atomic_write: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from("products.json")
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            pretty: false,
            atomic_write: default_true(),
        }
    }
}

impl StoreConfig {
    /// Config for a backing file at `path`, other settings defaulted
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from a YAML file
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}
