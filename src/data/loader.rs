//! CSV Data Loader Module
//! Handles weather CSV loading using Polars.

use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::data::schema::{HUMIDITY_PERCENT, TEMPERATURE_CELSIUS, WIND_SPEED_KPH};

/// Measurement columns read as `Float64` whatever the leading rows look like.
const NUMERIC_COLUMNS: [&str; 3] = [TEMPERATURE_CELSIUS, HUMIDITY_PERCENT, WIND_SPEED_KPH];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row, inferring column types from text.
    ///
    /// Measurement columns are pinned to `Float64` so a decimal past the
    /// inference window is not dropped to null by an integer guess.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_dtype_overwrite(Some(Arc::new(Self::numeric_overrides())))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    fn numeric_overrides() -> Schema {
        NUMERIC_COLUMNS
            .iter()
            .map(|name| Field::new((*name).into(), DataType::Float64))
            .collect()
    }
}

/// Load weather observations, reporting the outcome.
///
/// Any read failure is logged and turned into `None`; callers must check
/// before running later stages.
pub fn load_weather_data(file_path: &Path) -> Option<DataFrame> {
    match DataLoader::load_csv(file_path) {
        Ok(df) => {
            info!("Successfully loaded data from {}", file_path.display());
            Some(df)
        }
        Err(e) => {
            error!("Error loading data: {}", e);
            None
        }
    }
}
