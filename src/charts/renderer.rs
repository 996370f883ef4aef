//! Static Chart Renderer
//! The seam between chart models and whatever draws them to image files.

use polars::prelude::DataFrame;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::builder::WeatherCharts;
use super::model::ChartJob;
use crate::output::OutputError;

/// Draws one chart model to an image file.
pub trait ChartRenderer {
    fn render(&self, job: &ChartJob, path: &Path) -> Result<(), OutputError>;
}

/// Render the four weather charts into `output_dir`, creating it if needed.
///
/// Returns the written file paths in render order. The first failure aborts
/// the remaining charts.
pub fn plot_visualizations(
    df: &DataFrame,
    output_dir: &Path,
    renderer: &dyn ChartRenderer,
) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(output_dir).map_err(|e| OutputError::io(output_dir, e))?;

    let mut written = Vec::new();
    for job in WeatherCharts::all(df)? {
        let path = output_dir.join(job.file_name);
        renderer.render(&job, &path)?;
        debug!("Rendered '{}' to {}", job.chart.title(), path.display());
        written.push(path);
    }

    info!("Visualizations saved to {}", output_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::model::Chart;
    use polars::prelude::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(String, PathBuf)>>,
        fail_on: Option<&'static str>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, job: &ChartJob, path: &Path) -> Result<(), OutputError> {
            if self.fail_on == Some(job.file_name) {
                return Err(OutputError::Render {
                    path: path.to_path_buf(),
                    reason: "backend unavailable".to_string(),
                });
            }
            self.calls
                .borrow_mut()
                .push((job.chart.title().to_string(), path.to_path_buf()));
            Ok(())
        }
    }

    fn table() -> DataFrame {
        df!(
            "city" => ["Rome", "Oslo"],
            "date" => ["2024-01-01", "2024-01-02"],
            "temperature_celsius" => [14.0, -2.0],
            "humidity_percent" => [60.0, 80.0],
            "wind_speed_kph" => [8.0, 20.0],
            "weather_condition" => ["Sunny", "Snow"]
        )
        .unwrap()
    }

    #[test]
    fn test_renders_four_charts_into_created_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("outputs");
        let renderer = RecordingRenderer::default();

        let written = plot_visualizations(&table(), &out, &renderer).unwrap();

        assert!(out.is_dir());
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "avg_temperature_chart.png",
                "temperature_trend.png",
                "humidity_vs_wind_speed.png",
                "weather_condition_distribution.png",
            ]
        );
        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].0, "Average Temperature per City (Celsius)");
        assert_eq!(calls[3].1, out.join("weather_condition_distribution.png"));
    }

    #[test]
    fn test_render_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let renderer = RecordingRenderer {
            fail_on: Some("humidity_vs_wind_speed.png"),
            ..Default::default()
        };

        let err = plot_visualizations(&table(), dir.path(), &renderer).unwrap_err();

        assert!(matches!(err, OutputError::Render { .. }));
        assert_eq!(renderer.calls.borrow().len(), 2);
    }

    #[test]
    fn test_chart_models_reach_renderer() {
        let jobs = WeatherCharts::all(&table()).unwrap();

        assert!(matches!(jobs[3].chart, Chart::Pie(ref pie) if pie.total() == 2));
    }
}
