//! Pipeline configuration.
//!
//! File locations for one run. Every field has a default so a JSON config
//! only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw observations CSV
    pub input_path: PathBuf,
    /// Cleaned and transformed CSV
    pub output_csv: PathBuf,
    /// Markdown temperature report
    pub report_path: PathBuf,
    /// Directory receiving the chart images
    pub charts_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/raw/weather_data.csv"),
            output_csv: PathBuf::from("data/processed/transformed_weather_data.csv"),
            report_path: PathBuf::from("outputs/weather_report.md"),
            charts_dir: PathBuf::from("outputs"),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON config; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
