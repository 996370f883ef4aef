//! Stats module - Per-city aggregates

mod calculator;

pub use calculator::{GroupMean, StatsCalculator};
