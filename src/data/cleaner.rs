//! Data Cleaner Module
//! Date normalization, per-city mean imputation and condition fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, info};

use crate::data::schema::{
    self, SchemaError, CITY, DATE, HUMIDITY_PERCENT, TEMPERATURE_CELSIUS, WEATHER_CONDITION,
};
use crate::stats::StatsCalculator;

/// Label used for observations without a recorded condition.
pub const UNKNOWN_CONDITION: &str = "Unknown";

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parse a calendar date, or `None` if the text is not a recognizable date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Result of imputing one numeric column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImputeOutcome {
    /// Nulls replaced with their city mean
    pub filled: usize,
    /// Nulls left because the city has no observation at all
    pub remaining: usize,
}

/// Counters describing what a cleaning pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningSummary {
    pub rows: usize,
    pub unparseable_dates: usize,
    pub temperature: ImputeOutcome,
    pub humidity: ImputeOutcome,
    pub conditions_filled: usize,
}

impl CleaningSummary {
    /// True when the pass did not have to change any value.
    pub fn is_clean(&self) -> bool {
        self.unparseable_dates == 0
            && self.temperature.filled == 0
            && self.humidity.filled == 0
            && self.conditions_filled == 0
    }
}

/// Handles weather data cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a raw weather table.
    pub fn clean(df: DataFrame) -> Result<DataFrame, SchemaError> {
        Self::clean_with_summary(df).map(|(df, _)| df)
    }

    /// Clean a raw weather table and report what was changed.
    pub fn clean_with_summary(
        mut df: DataFrame,
    ) -> Result<(DataFrame, CleaningSummary), SchemaError> {
        schema::require_columns(
            &df,
            &[
                CITY,
                DATE,
                TEMPERATURE_CELSIUS,
                HUMIDITY_PERCENT,
                WEATHER_CONDITION,
            ],
        )?;

        let summary = CleaningSummary {
            rows: df.height(),
            unparseable_dates: Self::normalize_dates(&mut df)?,
            temperature: Self::impute_group_mean(&mut df, TEMPERATURE_CELSIUS)?,
            humidity: Self::impute_group_mean(&mut df, HUMIDITY_PERCENT)?,
            conditions_filled: Self::fill_missing_condition(&mut df)?,
        };

        debug!("Cleaning summary: {:?}", summary);
        info!("Data cleaning completed.");
        Ok((df, summary))
    }

    /// Replace the date column with parsed calendar dates.
    ///
    /// Returns how many non-empty values could not be parsed.
    pub fn normalize_dates(df: &mut DataFrame) -> Result<usize, SchemaError> {
        let raw = schema::str_values(df, DATE)?;

        let mut unparseable = 0;
        let dates: Vec<Option<NaiveDate>> = raw
            .iter()
            .map(|value| {
                let value = value.as_deref()?;
                let parsed = parse_date(value);
                if parsed.is_none() && !value.trim().is_empty() {
                    unparseable += 1;
                }
                parsed
            })
            .collect();

        df.with_column(Column::new(DATE.into(), dates))?;
        Ok(unparseable)
    }

    /// Fill nulls in `column` with the mean of the same city's observations.
    pub fn impute_group_mean(
        df: &mut DataFrame,
        column: &str,
    ) -> Result<ImputeOutcome, SchemaError> {
        let cities = schema::str_values(df, CITY)?;
        let values = schema::f64_values(df, column)?;

        let means = StatsCalculator::group_means(&cities, &values);

        let mut outcome = ImputeOutcome::default();
        let imputed: Vec<Option<f64>> = cities
            .iter()
            .zip(values)
            .map(|(city, value)| {
                if value.is_some() {
                    return value;
                }
                let mean = city.as_ref().and_then(|c| means.get(c)).copied();
                match mean {
                    Some(_) => outcome.filled += 1,
                    None => outcome.remaining += 1,
                }
                mean
            })
            .collect();

        df.with_column(Column::new(column.into(), imputed))?;
        Ok(outcome)
    }

    /// Replace missing condition labels with `"Unknown"`.
    pub fn fill_missing_condition(df: &mut DataFrame) -> Result<usize, SchemaError> {
        let conditions = schema::str_values(df, WEATHER_CONDITION)?;

        let filled = conditions.iter().filter(|c| c.is_none()).count();
        let conditions: Vec<String> = conditions
            .into_iter()
            .map(|c| c.unwrap_or_else(|| UNKNOWN_CONDITION.to_string()))
            .collect();

        df.with_column(Column::new(WEATHER_CONDITION.into(), conditions))?;
        Ok(filled)
    }
}
