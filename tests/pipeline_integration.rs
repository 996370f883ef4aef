//! End-to-end tests for the weather pipeline
//!
//! Runs every stage against small CSV fixtures in a scratch directory. Chart
//! drawing goes through a stub renderer so the tests do not depend on system
//! fonts.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use weather_pipeline::charts::{ChartJob, ChartRenderer};
use weather_pipeline::data::schema::{
    self, CITY, HUMIDITY_PERCENT, TEMPERATURE_CELSIUS, TEMPERATURE_FAHRENHEIT, WEATHER_CONDITION,
};
use weather_pipeline::data::{load_weather_data, DataCleaner, DataTransformer};
use weather_pipeline::output::OutputError;
use weather_pipeline::{run, PipelineConfig};

const RAW_CSV: &str = "\
city,date,temperature_celsius,humidity_percent,wind_speed_kph,weather_condition
A,2024-01-01,,55,10.0,Sunny
A,2024-01-02,10.0,,12.5,
A,2024-01-03,20.0,65,8.0,Rain
B,not-a-date,,70,15.0,Cloudy
B,2024-01-02,,,14.0,
C,01/05/2024,30.5,40,5.5,Sunny
";

/// Writes an empty placeholder instead of drawing.
struct TouchRenderer;

impl ChartRenderer for TouchRenderer {
    fn render(&self, _job: &ChartJob, path: &Path) -> Result<(), OutputError> {
        fs::write(path, b"").map_err(|e| OutputError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn scratch_config(dir: &TempDir) -> PipelineConfig {
    let input = dir.path().join("raw").join("weather_data.csv");
    fs::create_dir_all(input.parent().unwrap()).unwrap();
    fs::write(&input, RAW_CSV).unwrap();

    PipelineConfig {
        input_path: input,
        output_csv: dir.path().join("processed").join("transformed_weather_data.csv"),
        report_path: dir.path().join("outputs").join("weather_report.md"),
        charts_dir: dir.path().join("outputs"),
    }
}

#[test]
fn test_full_run_writes_every_output() {
    let dir = TempDir::new().unwrap();
    let config = scratch_config(&dir);

    let outcome = run(&config, &TouchRenderer).unwrap().unwrap();

    assert_eq!(outcome.rows, 6);
    assert!(config.output_csv.is_file());
    assert!(config.report_path.is_file());
    let expected: Vec<PathBuf> = [
        "avg_temperature_chart.png",
        "temperature_trend.png",
        "humidity_vs_wind_speed.png",
        "weather_condition_distribution.png",
    ]
    .iter()
    .map(|f| config.charts_dir.join(f))
    .collect();
    assert_eq!(outcome.charts, expected);
    assert!(expected.iter().all(|p| p.is_file()));

    assert_eq!(outcome.cleaning.unparseable_dates, 1);
    assert_eq!(outcome.cleaning.temperature.filled, 1);
    assert_eq!(outcome.cleaning.temperature.remaining, 2);
    assert_eq!(outcome.cleaning.humidity.filled, 2);
    assert_eq!(outcome.cleaning.conditions_filled, 2);
}

#[test]
fn test_report_contents_match_city_means() {
    let dir = TempDir::new().unwrap();
    let config = scratch_config(&dir);

    run(&config, &TouchRenderer).unwrap().unwrap();

    let report = fs::read_to_string(&config.report_path).unwrap();
    assert_eq!(
        report,
        "# Top 5 Cities by Average Temperature (Celsius)\n\n\
         - C: 30.5°C\n\
         - A: 15.0°C\n"
    );
}

#[test]
fn test_output_csv_has_fahrenheit_and_all_rows() {
    let dir = TempDir::new().unwrap();
    let config = scratch_config(&dir);

    run(&config, &TouchRenderer).unwrap().unwrap();

    let reloaded = load_weather_data(&config.output_csv).unwrap();
    assert_eq!(reloaded.height(), 6);
    let names: Vec<String> = reloaded
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names.last().map(String::as_str), Some(TEMPERATURE_FAHRENHEIT));

    let celsius = schema::f64_values(&reloaded, TEMPERATURE_CELSIUS).unwrap();
    let fahrenheit = schema::f64_values(&reloaded, TEMPERATURE_FAHRENHEIT).unwrap();
    assert_eq!(celsius[0], Some(15.0));
    assert_eq!(celsius[3], None);
    for (c, f) in celsius.iter().zip(&fahrenheit) {
        match (c, f) {
            (Some(c), Some(f)) => assert!((f - (c * 1.8 + 32.0)).abs() < 1e-9),
            (None, None) => {}
            other => panic!("celsius/fahrenheit nullness differs: {:?}", other),
        }
    }

    let conditions = schema::str_values(&reloaded, WEATHER_CONDITION).unwrap();
    assert_eq!(conditions[1].as_deref(), Some("Unknown"));
    assert_eq!(conditions[4].as_deref(), Some("Unknown"));
}

#[test]
fn test_missing_input_stops_before_any_output() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        input_path: dir.path().join("nope.csv"),
        output_csv: dir.path().join("out.csv"),
        report_path: dir.path().join("report.md"),
        charts_dir: dir.path().join("charts"),
    };

    let outcome = run(&config, &TouchRenderer).unwrap();

    assert!(outcome.is_none());
    assert!(!config.output_csv.exists());
    assert!(!config.report_path.exists());
    assert!(!config.charts_dir.exists());
}

#[test]
fn test_stages_preserve_rows_and_clean_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = scratch_config(&dir);

    let raw = load_weather_data(&config.input_path).unwrap();
    let raw_rows = raw.height();
    let cleaned = DataCleaner::clean(raw).unwrap();
    let again = DataCleaner::clean(cleaned.clone()).unwrap();
    let transformed = DataTransformer::transform(cleaned.clone()).unwrap();

    assert_eq!(cleaned.height(), raw_rows);
    assert_eq!(transformed.height(), raw_rows);
    assert_eq!(transformed.width(), cleaned.width() + 1);
    assert!(cleaned.equals_missing(&again));

    let cities = schema::str_values(&cleaned, CITY).unwrap();
    let humidity = schema::f64_values(&cleaned, HUMIDITY_PERCENT).unwrap();
    for (city, h) in cities.iter().zip(&humidity) {
        if city.as_deref() != Some("B") {
            assert!(h.is_some(), "humidity left null for {:?}", city);
        }
    }
}
