//! Markdown report of the warmest cities.

use polars::prelude::DataFrame;
use std::fs;
use std::path::Path;
use tracing::info;

use super::{ensure_parent_dir, OutputError};
use crate::data::schema::{self, CITY, TEMPERATURE_CELSIUS};
use crate::stats::{GroupMean, StatsCalculator};

pub const REPORT_TITLE: &str = "# Top 5 Cities by Average Temperature (Celsius)";
pub const TOP_CITIES: usize = 5;

/// Render ranked city means as the Markdown report body.
pub fn render_report(ranked: &[GroupMean]) -> String {
    let mut out = format!("{}\n\n", REPORT_TITLE);
    for entry in ranked {
        // Debug formatting keeps a trailing ".0" on whole numbers
        out.push_str(&format!("- {}: {:?}°C\n", entry.city, entry.mean));
    }
    out
}

/// Write the five warmest cities by mean Celsius temperature.
///
/// Returns the ranked, rounded entries that were written.
pub fn generate_temperature_report(
    df: &DataFrame,
    report_path: &Path,
) -> Result<Vec<GroupMean>, OutputError> {
    let cities = schema::str_values(df, CITY)?;
    let temps = schema::f64_values(df, TEMPERATURE_CELSIUS)?;

    let means = StatsCalculator::group_means(&cities, &temps);
    let ranked: Vec<GroupMean> = StatsCalculator::top_n(&means, TOP_CITIES)
        .into_iter()
        .map(|g| GroupMean {
            mean: StatsCalculator::round_to(g.mean, 2),
            ..g
        })
        .collect();

    ensure_parent_dir(report_path)?;
    fs::write(report_path, render_report(&ranked))
        .map_err(|e| OutputError::io(report_path, e))?;

    info!("Temperature report saved to {}", report_path.display());
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_report_format() {
        let ranked = vec![
            GroupMean {
                city: "Cairo".to_string(),
                mean: 31.25,
            },
            GroupMean {
                city: "Rome".to_string(),
                mean: 15.0,
            },
        ];

        assert_eq!(
            render_report(&ranked),
            "# Top 5 Cities by Average Temperature (Celsius)\n\n\
             - Cairo: 31.25°C\n\
             - Rome: 15.0°C\n"
        );
    }

    #[test]
    fn test_report_keeps_five_warmest_rounded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("weather_report.md");
        let df = df!(
            CITY => ["A", "A", "B", "C", "D", "E", "F", "G"],
            TEMPERATURE_CELSIUS => [
                Some(10.0),
                Some(10.34),
                Some(30.0),
                Some(-5.0),
                Some(22.0),
                Some(22.0),
                Some(8.0),
                None,
            ]
        )
        .unwrap();

        let ranked = generate_temperature_report(&df, &path).unwrap();

        let cities: Vec<&str> = ranked.iter().map(|g| g.city.as_str()).collect();
        assert_eq!(cities, vec!["B", "D", "E", "A", "F"]);
        assert_eq!(ranked[3].mean, 10.17);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("- A: 10.17°C\n"));
        assert!(text.contains("- B: 30.0°C\n"));
        assert!(!text.contains("- G:"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 5);
    }

    #[test]
    fn test_report_rounds_exact_half_to_even() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weather_report.md");
        let df = df!(
            CITY => ["A", "A", "B", "B"],
            TEMPERATURE_CELSIUS => [10.0, 10.25, 0.0, 0.25]
        )
        .unwrap();

        let ranked = generate_temperature_report(&df, &path).unwrap();

        assert_eq!(ranked[0].mean, 10.12);
        assert_eq!(ranked[1].mean, 0.12);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("- A: 10.12°C\n"));
        assert!(text.contains("- B: 0.12°C\n"));
    }
}
