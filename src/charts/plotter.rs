//! Chart Plotter Module
//! Draws the chart models to PNG files using plotters.
//!
//! Each chart owns its drawing area for the duration of one function call;
//! the bitmap is flushed with `present()` and released when the area drops.

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::model::{BarChart, Chart, ChartJob, LineChart, PieChart, ScatterChart};
use super::renderer::ChartRenderer;
use crate::output::OutputError;

type DrawResult = Result<(), Box<dyn Error>>;

const FONT: &str = "sans-serif";

/// Series colors for the line chart.
const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),   // Red
    RGBColor(52, 152, 219),  // Blue
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Pastel fills for pie slices.
const PASTEL: [RGBColor; 10] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
    RGBColor(208, 187, 255),
    RGBColor(222, 187, 155),
    RGBColor(250, 176, 228),
    RGBColor(207, 207, 207),
    RGBColor(255, 254, 163),
    RGBColor(185, 242, 240),
];

const COOLWARM: [RGBColor; 3] = [
    RGBColor(59, 76, 192),
    RGBColor(221, 221, 221),
    RGBColor(180, 4, 38),
];

const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

/// Color `index` of `count` evenly spaced along a piecewise-linear ramp.
fn ramp_color(ramp: &[RGBColor], index: usize, count: usize) -> RGBColor {
    if count <= 1 || ramp.len() < 2 {
        return ramp[0];
    }
    let t = index.min(count - 1) as f64 / (count - 1) as f64;
    let pos = t * (ramp.len() - 1) as f64;
    let lo = (pos.floor() as usize).min(ramp.len() - 2);
    let frac = pos - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (ramp[lo], ramp[lo + 1]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn coolwarm(index: usize, count: usize) -> RGBColor {
    ramp_color(&COOLWARM, index, count)
}

fn viridis(index: usize, count: usize) -> RGBColor {
    ramp_color(&VIRIDIS, index, count)
}

/// Axis bounds covering `values`, padded by 10% of the span.
fn padded_range(values: impl Iterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_infinite() {
        return (0.0, 1.0);
    }
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    let pad = if max > min { (max - min) * 0.1 } else { 1.0 };
    (if include_zero && min == 0.0 { 0.0 } else { min - pad }, max + pad)
}

fn format_day(day: &i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(*day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn marker_radius(area: f64) -> u32 {
    (area / std::f64::consts::PI).sqrt().round().max(2.0) as u32
}

/// Renders charts to PNG bitmaps with plotters.
pub struct PlottersRenderer;

impl ChartRenderer for PlottersRenderer {
    fn render(&self, job: &ChartJob, path: &Path) -> Result<(), OutputError> {
        let result = match &job.chart {
            Chart::Bar(chart) => Self::draw_bar(chart, path, job.size),
            Chart::Line(chart) => Self::draw_line(chart, path, job.size),
            Chart::Scatter(chart) => Self::draw_scatter(chart, path, job.size),
            Chart::Pie(chart) => Self::draw_pie(chart, path, job.size),
        };
        result.map_err(|e| OutputError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl PlottersRenderer {
    fn draw_bar(chart: &BarChart, path: &Path, size: (u32, u32)) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let count = chart.bars.len();
        let rows = count.max(1);
        let labels: Vec<String> = chart.bars.iter().map(|b| b.city.clone()).collect();
        let (x_min, x_max) = padded_range(chart.bars.iter().map(|b| b.mean), true);
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(4) as u32;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(40 + label_width * 9)
            .build_cartesian_2d(x_min..x_max, (0..rows).into_segmented())?;

        ctx.configure_mesh()
            .disable_y_mesh()
            .y_labels(rows)
            .y_label_formatter(&|v: &SegmentValue<usize>| match v {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                    labels.get(*i).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .axis_desc_style((FONT, 18))
            .draw()?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let (lo, hi) = if bar.mean < 0.0 {
                (bar.mean, 0.0)
            } else {
                (0.0, bar.mean)
            };
            let mut rect = Rectangle::new(
                [(lo, SegmentValue::Exact(i)), (hi, SegmentValue::Exact(i + 1))],
                coolwarm(i, count).filled(),
            );
            rect.set_margin(6, 6, 0, 0);
            rect
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_line(chart: &LineChart, path: &Path, size: (u32, u32)) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let days: Vec<i32> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(d, _)| d.num_days_from_ce()))
            .collect();
        let x_min = days.iter().min().copied().unwrap_or(0);
        let x_max = days.iter().max().copied().unwrap_or(0);
        let (x_min, x_max) = if x_max > x_min {
            (x_min, x_max)
        } else {
            (x_min - 1, x_max + 1)
        };
        let (y_min, y_max) = padded_range(
            chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)),
            false,
        );

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        ctx.configure_mesh()
            .x_labels(8)
            .x_label_formatter(&format_day)
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .axis_desc_style((FONT, 18))
            .draw()?;

        for (i, series) in chart.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let points: Vec<(i32, f64)> = series
                .points
                .iter()
                .map(|(d, t)| (d.num_days_from_ce(), *t))
                .collect();

            ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            ctx.draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))?;
        }

        if !chart.series.is_empty() {
            ctx.configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_scatter(chart: &ScatterChart, path: &Path, size: (u32, u32)) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let points = || chart.groups.iter().flat_map(|g| g.points.iter());
        let (x_min, x_max) = padded_range(points().map(|p| p.x), false);
        let (y_min, y_max) = padded_range(points().map(|p| p.y), false);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        ctx.configure_mesh()
            .x_desc(&chart.x_desc)
            .y_desc(&chart.y_desc)
            .axis_desc_style((FONT, 18))
            .draw()?;

        let count = chart.groups.len();
        for (i, group) in chart.groups.iter().enumerate() {
            let color = viridis(i, count);
            ctx.draw_series(group.points.iter().map(|p| {
                Circle::new((p.x, p.y), marker_radius(p.area), color.mix(0.8).filled())
            }))?
            .label(group.label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        if count > 0 {
            ctx.configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_pie(chart: &PieChart, path: &Path, size: (u32, u32)) -> DrawResult {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled(&chart.title, (FONT, 28).into_font())?;

        let total = chart.total();
        if total > 0 {
            let (w, h) = area.dim_in_pixel();
            let center = (w as i32 / 2, h as i32 / 2);
            let radius = w.min(h) as f64 * 0.35;
            let sizes: Vec<f64> = chart.slices.iter().map(|s| s.count as f64).collect();
            let colors: Vec<RGBColor> = (0..chart.slices.len())
                .map(|i| PASTEL[i % PASTEL.len()])
                .collect();
            let labels: Vec<String> = chart
                .slices
                .iter()
                .map(|s| format!("{} ({:.1}%)", s.label, s.percent_of(total)))
                .collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style((FONT, 18).into_font().color(&BLACK));
            area.draw(&pie)?;
        }

        root.present()?;
        Ok(())
    }
}
