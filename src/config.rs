//! Dashboard configuration: optional `dashboard.json` plus an env override for the data path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "dashboard.json";
pub const DATA_PATH_ENV: &str = "SALES_DASHBOARD_DATA";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Order CSV to load at startup.
    pub data_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("train.csv"),
            log_filter: "info".to_string(),
            window_size: [1400.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// `dashboard.json` from the working directory, then the environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_data_path_override(std::env::var_os(DATA_PATH_ENV).map(PathBuf::from));
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_data_path_override(&mut self, data_path: Option<PathBuf>) {
        if let Some(path) = data_path.filter(|p| !p.as_os_str().is_empty()) {
            self.data_path = path;
        }
    }
}
