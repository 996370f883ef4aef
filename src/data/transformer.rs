//! Data Transformer Module
//! Derives the Fahrenheit temperature column.

use polars::prelude::*;
use tracing::info;

use crate::data::schema::{self, SchemaError, TEMPERATURE_CELSIUS, TEMPERATURE_FAHRENHEIT};

/// Convert a Celsius reading to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Handles derived-column transformations.
pub struct DataTransformer;

impl DataTransformer {
    /// Append `temperature_fahrenheit`; a null Celsius value stays null.
    pub fn transform(mut df: DataFrame) -> Result<DataFrame, SchemaError> {
        let fahrenheit: Vec<Option<f64>> = schema::f64_values(&df, TEMPERATURE_CELSIUS)?
            .into_iter()
            .map(|c| c.map(celsius_to_fahrenheit))
            .collect();

        df.with_column(Column::new(TEMPERATURE_FAHRENHEIT.into(), fahrenheit))?;

        info!("Data transformation completed.");
        Ok(df)
    }
}
