//! Configuration Module
//!
//! Settings come from `<config dir>/recipebox/config.toml` when it exists,
//! with `RECIPEBOX_DATA_DIR` taking precedence for the data directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "RECIPEBOX_DATA_DIR";
pub const LOG_ENV: &str = "RECIPEBOX_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recipebox")
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recipebox").join("config.toml"))
}

impl Config {
    /// Loads the user's config file, if any, then applies the environment.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse config TOML")?;
        let defaults = Self::default();
        Ok(Self {
            data_dir: file.data_dir.unwrap_or(defaults.data_dir),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("recipebox.log")
    }
}
