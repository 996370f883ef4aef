//! Weather Table Schema
//! Column names and typed column access over the weather DataFrame.

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;

use crate::data::cleaner::parse_date;

pub const CITY: &str = "city";
pub const DATE: &str = "date";
pub const TEMPERATURE_CELSIUS: &str = "temperature_celsius";
pub const HUMIDITY_PERCENT: &str = "humidity_percent";
pub const WIND_SPEED_KPH: &str = "wind_speed_kph";
pub const WEATHER_CONDITION: &str = "weather_condition";
pub const TEMPERATURE_FAHRENHEIT: &str = "temperature_fahrenheit";

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Fail with `MissingColumn` for the first absent column.
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<(), SchemaError> {
    match columns
        .iter()
        .find(|name| df.get_column_index(name).is_none())
    {
        Some(name) => Err(SchemaError::MissingColumn {
            column: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, SchemaError> {
    require_columns(df, &[name])?;
    Ok(df.column(name)?)
}

/// Numeric column as f64, with NaN treated as missing.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, SchemaError> {
    let values = column(df, name)?.cast(&DataType::Float64)?;
    let values = values.f64()?;
    Ok(values
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Text column as owned strings.
pub fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, SchemaError> {
    let values = column(df, name)?.cast(&DataType::String)?;
    let values = values.str()?;
    Ok(values
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Date column, whether it is still raw text or already a `Date` dtype.
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>, SchemaError> {
    Ok(str_values(df, name)?
        .into_iter()
        .map(|v| v.as_deref().and_then(parse_date))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_reports_first_missing() {
        let df = df!(CITY => ["A"], DATE => ["2024-01-01"]).unwrap();

        assert!(require_columns(&df, &[CITY, DATE]).is_ok());
        match require_columns(&df, &[CITY, HUMIDITY_PERCENT, WIND_SPEED_KPH]) {
            Err(SchemaError::MissingColumn { column }) => assert_eq!(column, HUMIDITY_PERCENT),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_f64_values_casts_integers_and_drops_nan() {
        let df = df!(
            HUMIDITY_PERCENT => [Some(60i64), None, Some(75)],
            TEMPERATURE_CELSIUS => [Some(1.5), Some(f64::NAN), None]
        )
        .unwrap();

        assert_eq!(
            f64_values(&df, HUMIDITY_PERCENT).unwrap(),
            vec![Some(60.0), None, Some(75.0)]
        );
        assert_eq!(
            f64_values(&df, TEMPERATURE_CELSIUS).unwrap(),
            vec![Some(1.5), None, None]
        );
    }

    #[test]
    fn test_date_values_reads_text_dates() {
        let df = df!(DATE => [Some("2024-03-01"), Some("garbage"), None]).unwrap();

        assert_eq!(
            date_values(&df, DATE).unwrap(),
            vec![NaiveDate::from_ymd_opt(2024, 3, 1), None, None]
        );
    }
}
