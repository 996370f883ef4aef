//! Statistics Calculator Module
//! Per-city aggregates and label frequencies over weather columns.

use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Mean of one city's observations.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub city: String,
    pub mean: f64,
}

/// Handles statistical calculations for the weather tables.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean of the non-null values of each city, keyed and ordered by city.
    ///
    /// Cities without a single observation are left out, as are rows with no
    /// city.
    pub fn group_means(
        cities: &[Option<String>],
        values: &[Option<f64>],
    ) -> BTreeMap<String, f64> {
        let mut observed: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (city, value) in cities.iter().zip(values) {
            if let (Some(city), Some(value)) = (city, value) {
                observed.entry(city.as_str()).or_default().push(*value);
            }
        }

        observed
            .into_iter()
            .map(|(city, vals)| (city.to_string(), vals.iter().mean()))
            .collect()
    }

    /// The `n` largest means, descending. Equal means keep city order.
    pub fn top_n(means: &BTreeMap<String, f64>, n: usize) -> Vec<GroupMean> {
        let mut ranked = Self::in_city_order(means);
        ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
        ranked.truncate(n);
        ranked
    }

    /// All means, ascending. Equal means keep city order.
    pub fn sorted_ascending(means: &BTreeMap<String, f64>) -> Vec<GroupMean> {
        let mut ranked = Self::in_city_order(means);
        ranked.sort_by(|a, b| a.mean.total_cmp(&b.mean));
        ranked
    }

    fn in_city_order(means: &BTreeMap<String, f64>) -> Vec<GroupMean> {
        means
            .iter()
            .map(|(city, mean)| GroupMean {
                city: city.clone(),
                mean: *mean,
            })
            .collect()
    }

    /// Label frequencies, most common first. Ties keep first appearance.
    pub fn value_counts(labels: &[Option<String>]) -> Vec<(String, usize)> {
        let order = Self::unique_in_order(labels);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for label in labels.iter().flatten() {
            *counts.entry(label.as_str()).or_default() += 1;
        }

        let mut result: Vec<(String, usize)> = order
            .into_iter()
            .map(|label| {
                let count = counts.get(label.as_str()).copied().unwrap_or(0);
                (label, count)
            })
            .collect();
        result.sort_by(|a, b| b.1.cmp(&a.1));
        result
    }

    /// Distinct non-null values in order of first appearance.
    pub fn unique_in_order(values: &[Option<String>]) -> Vec<String> {
        let mut seen = HashSet::new();
        values
            .iter()
            .flatten()
            .filter(|v| seen.insert(v.as_str()))
            .cloned()
            .collect()
    }

    /// Round to `decimals` places, exact halves to the even neighbour.
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round_ties_even() / factor
    }
}
