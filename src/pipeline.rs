//! Pipeline driver.
//!
//! Runs load → clean → transform → output for one configuration. The table
//! is moved from stage to stage; nothing is kept between runs.

use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::charts::{plot_visualizations, ChartRenderer};
use crate::config::PipelineConfig;
use crate::data::{load_weather_data, CleaningSummary, DataCleaner, DataTransformer, SchemaError};
use crate::output::{generate_temperature_report, save_transformed_data, OutputError};
use crate::stats::GroupMean;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub rows: usize,
    pub cleaning: CleaningSummary,
    pub report: Vec<GroupMean>,
    pub charts: Vec<PathBuf>,
}

/// Run every stage once.
///
/// Returns `Ok(None)` when the input could not be loaded; the failure has
/// already been logged and no output is written.
pub fn run(
    config: &PipelineConfig,
    renderer: &dyn ChartRenderer,
) -> Result<Option<PipelineOutcome>, PipelineError> {
    let Some(raw) = load_weather_data(&config.input_path) else {
        return Ok(None);
    };

    let (cleaned, cleaning) = DataCleaner::clean_with_summary(raw)?;
    let transformed = DataTransformer::transform(cleaned)?;

    save_transformed_data(&transformed, &config.output_csv)?;
    let report = generate_temperature_report(&transformed, &config.report_path)?;
    let charts = plot_visualizations(&transformed, &config.charts_dir, renderer)?;

    info!(
        "Pipeline finished: {} rows, {} report entries, {} charts",
        transformed.height(),
        report.len(),
        charts.len()
    );

    Ok(Some(PipelineOutcome {
        rows: transformed.height(),
        cleaning,
        report,
        charts,
    }))
}
