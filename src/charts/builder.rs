//! Chart Builder
//! Turns the transformed weather table into the four chart models.

use polars::prelude::DataFrame;

use super::model::{
    BarChart, Chart, ChartJob, LineChart, NamedSeries, PieChart, PieSlice, ScatterChart,
    ScatterPoint,
};
use crate::data::schema::{
    self, SchemaError, CITY, DATE, HUMIDITY_PERCENT, TEMPERATURE_CELSIUS, WEATHER_CONDITION,
    WIND_SPEED_KPH,
};
use crate::stats::StatsCalculator;

pub const AVG_TEMPERATURE_FILE: &str = "avg_temperature_chart.png";
pub const TEMPERATURE_TREND_FILE: &str = "temperature_trend.png";
pub const HUMIDITY_WIND_FILE: &str = "humidity_vs_wind_speed.png";
pub const CONDITION_DISTRIBUTION_FILE: &str = "weather_condition_distribution.png";

/// Marker area range for the scatter chart, in square pixels.
const MIN_MARKER_AREA: f64 = 20.0;
const MAX_MARKER_AREA: f64 = 200.0;

/// Builds chart models from a weather table.
pub struct WeatherCharts;

impl WeatherCharts {
    /// All four charts with their output file names and image sizes.
    pub fn all(df: &DataFrame) -> Result<Vec<ChartJob>, SchemaError> {
        Ok(vec![
            ChartJob {
                file_name: AVG_TEMPERATURE_FILE,
                size: (1000, 600),
                chart: Chart::Bar(Self::average_temperature(df)?),
            },
            ChartJob {
                file_name: TEMPERATURE_TREND_FILE,
                size: (1200, 600),
                chart: Chart::Line(Self::temperature_trend(df)?),
            },
            ChartJob {
                file_name: HUMIDITY_WIND_FILE,
                size: (1000, 600),
                chart: Chart::Scatter(Self::humidity_vs_wind_speed(df)?),
            },
            ChartJob {
                file_name: CONDITION_DISTRIBUTION_FILE,
                size: (800, 800),
                chart: Chart::Pie(Self::condition_distribution(df)?),
            },
        ])
    }

    /// Mean temperature per city, ascending.
    pub fn average_temperature(df: &DataFrame) -> Result<BarChart, SchemaError> {
        let cities = schema::str_values(df, CITY)?;
        let temps = schema::f64_values(df, TEMPERATURE_CELSIUS)?;
        let means = StatsCalculator::group_means(&cities, &temps);

        Ok(BarChart {
            title: "Average Temperature per City (Celsius)".to_string(),
            x_desc: "Temperature (°C)".to_string(),
            y_desc: "City".to_string(),
            bars: StatsCalculator::sorted_ascending(&means),
        })
    }

    /// Temperature over time, one date-sorted series per city.
    pub fn temperature_trend(df: &DataFrame) -> Result<LineChart, SchemaError> {
        let cities = schema::str_values(df, CITY)?;
        let dates = schema::date_values(df, DATE)?;
        let temps = schema::f64_values(df, TEMPERATURE_CELSIUS)?;

        let series = StatsCalculator::unique_in_order(&cities)
            .into_iter()
            .map(|city| {
                let mut points: Vec<_> = cities
                    .iter()
                    .zip(dates.iter().zip(&temps))
                    .filter(|(c, _)| c.as_deref() == Some(city.as_str()))
                    .filter_map(|(_, (date, temp))| Some(((*date)?, (*temp)?)))
                    .collect();
                points.sort_by_key(|(date, _)| *date);
                NamedSeries {
                    label: city,
                    points,
                }
            })
            .collect();

        Ok(LineChart {
            title: "Temperature Trend Over Time".to_string(),
            x_desc: "Date".to_string(),
            y_desc: "Temperature (°C)".to_string(),
            series,
        })
    }

    /// Humidity against wind speed, colored by city and sized by temperature.
    pub fn humidity_vs_wind_speed(df: &DataFrame) -> Result<ScatterChart, SchemaError> {
        let cities = schema::str_values(df, CITY)?;
        let humidity = schema::f64_values(df, HUMIDITY_PERCENT)?;
        let wind = schema::f64_values(df, WIND_SPEED_KPH)?;
        let temps = schema::f64_values(df, TEMPERATURE_CELSIUS)?;

        let scale = AreaScale::over(temps.iter().flatten().copied());

        let groups = StatsCalculator::unique_in_order(&cities)
            .into_iter()
            .map(|city| {
                let points = (0..cities.len())
                    .filter(|&i| cities[i].as_deref() == Some(city.as_str()))
                    .filter_map(|i| {
                        Some(ScatterPoint {
                            x: humidity[i]?,
                            y: wind[i]?,
                            area: scale.area(temps[i]),
                        })
                    })
                    .collect();
                NamedSeries {
                    label: city,
                    points,
                }
            })
            .collect();

        Ok(ScatterChart {
            title: "Humidity vs Wind Speed by City".to_string(),
            x_desc: "Humidity (%)".to_string(),
            y_desc: "Wind Speed (kph)".to_string(),
            groups,
        })
    }

    /// Frequency of each weather condition, most common first.
    pub fn condition_distribution(df: &DataFrame) -> Result<PieChart, SchemaError> {
        let conditions = schema::str_values(df, WEATHER_CONDITION)?;

        Ok(PieChart {
            title: "Weather Condition Distribution".to_string(),
            slices: StatsCalculator::value_counts(&conditions)
                .into_iter()
                .map(|(label, count)| PieSlice { label, count })
                .collect(),
        })
    }
}

/// Linear map from a temperature range onto marker areas.
struct AreaScale {
    min: f64,
    max: f64,
}

impl AreaScale {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            AreaScale {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |s, v| AreaScale {
                min: s.min.min(v),
                max: s.max.max(v),
            },
        )
    }

    fn area(&self, value: Option<f64>) -> f64 {
        let Some(value) = value else {
            return MIN_MARKER_AREA;
        };
        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 {
            return (MIN_MARKER_AREA + MAX_MARKER_AREA) / 2.0;
        }
        MIN_MARKER_AREA + (value - self.min) / span * (MAX_MARKER_AREA - MIN_MARKER_AREA)
    }
}
