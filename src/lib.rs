//! Weather Pipeline - cleaning, imputation, reporting and static charts
//!
//! A single-pass batch pipeline over an in-memory table of weather
//! observations:
//!
//! 1. [`data::load_weather_data`] reads the raw CSV.
//! 2. [`data::DataCleaner`] normalizes dates, imputes per-city means and
//!    fills unknown conditions.
//! 3. [`data::DataTransformer`] derives `temperature_fahrenheit`.
//! 4. [`output`] and [`charts`] write the CSV, the Markdown report and four
//!    PNG charts.
//!
//! [`pipeline::run`] chains the stages for one [`config::PipelineConfig`].

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod output;
pub mod pipeline;
pub mod stats;

pub use config::PipelineConfig;
pub use pipeline::{run, PipelineError, PipelineOutcome};
