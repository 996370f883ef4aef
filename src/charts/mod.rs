//! Charts module - Chart models and static rendering

mod builder;
pub mod model;
mod plotter;
mod renderer;

pub use builder::{
    WeatherCharts, AVG_TEMPERATURE_FILE, CONDITION_DISTRIBUTION_FILE, HUMIDITY_WIND_FILE,
    TEMPERATURE_TREND_FILE,
};
pub use model::{Chart, ChartJob};
pub use plotter::PlottersRenderer;
pub use renderer::{plot_visualizations, ChartRenderer};
