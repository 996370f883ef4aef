//! Command-line arguments for the weather pipeline.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::config::{ConfigError, PipelineConfig};

/// Clean, impute and chart a CSV of weather observations
#[derive(Debug, Clone, Parser)]
#[command(name = "weather-pipeline", version, about)]
pub struct Args {
    /// JSON file with pipeline paths; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Raw observations CSV
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Where to write the transformed CSV
    #[arg(short = 'o', long = "output-csv", value_name = "PATH")]
    pub output_csv: Option<PathBuf>,

    /// Where to write the Markdown report
    #[arg(short = 'r', long = "report", value_name = "PATH")]
    pub report_path: Option<PathBuf>,

    /// Directory for the chart images
    #[arg(short = 'c', long = "charts-dir", value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Defaults, then the config file, then explicit flags.
    pub fn resolve_config(&self) -> Result<PipelineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(path) = &self.input_path {
            config.input_path = path.clone();
        }
        if let Some(path) = &self.output_csv {
            config.output_csv = path.clone();
        }
        if let Some(path) = &self.report_path {
            config.report_path = path.clone();
        }
        if let Some(dir) = &self.charts_dir {
            config.charts_dir = dir.clone();
        }
        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}
