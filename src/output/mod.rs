//! Output module - CSV persistence and the Markdown temperature report

mod report;
mod writer;

use polars::prelude::PolarsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::SchemaError;

pub use report::{generate_temperature_report, render_report, REPORT_TITLE, TOP_CITIES};
pub use writer::save_transformed_data;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Failed to render chart {path}: {reason}")]
    Render { path: PathBuf, reason: String },
}

impl OutputError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        OutputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Create the directory that will hold `path`, if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::io(parent, e))
        }
        _ => Ok(()),
    }
}
