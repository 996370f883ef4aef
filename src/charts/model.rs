//! Chart Models
//! Plain series data for the four weather charts, independent of any
//! drawing library.

use chrono::NaiveDate;

use crate::stats::GroupMean;

/// A labelled series of points.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries<P> {
    pub label: String,
    pub points: Vec<P>,
}

/// Horizontal bars, drawn bottom-up in the given order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub bars: Vec<GroupMean>,
}

/// One line per series over calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub series: Vec<NamedSeries<(NaiveDate, f64)>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Marker area in square pixels
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub groups: Vec<NamedSeries<ScatterPoint>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

impl PieSlice {
    /// Share of `total` in percent.
    pub fn percent_of(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 * 100.0 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChart),
    Line(LineChart),
    Scatter(ScatterChart),
    Pie(PieChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(c) => &c.title,
            Chart::Line(c) => &c.title,
            Chart::Scatter(c) => &c.title,
            Chart::Pie(c) => &c.title,
        }
    }
}

/// A chart together with where and how large it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartJob {
    pub file_name: &'static str,
    /// Image size in pixels (width, height)
    pub size: (u32, u32),
    pub chart: Chart,
}
