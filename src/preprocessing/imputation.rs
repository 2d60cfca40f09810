//! Imputation statistics.
//!
//! All functions take the non-missing training values of one column and
//! return `None` when there are none.

use crate::config::ImputationStrategy;
use std::collections::BTreeMap;

/// Imputation value for a numerical column under `strategy`.
pub fn numerical_fill_value(values: &[f64], strategy: ImputationStrategy) -> Option<f64> {
    match strategy {
        ImputationStrategy::Mean => mean(values),
        ImputationStrategy::Median => median(values),
        ImputationStrategy::MostFrequent => most_frequent_number(values),
    }
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for an even count
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value; ties go to the smallest value
pub fn most_frequent_number(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best: Option<(f64, usize)> = None;
    let mut iter = sorted.into_iter().peekable();
    while let Some(value) = iter.next() {
        let mut count = 1;
        // -0.0 and 0.0 sort apart under total_cmp but are the same value
        while iter.peek().is_some_and(|&next| next == value) {
            iter.next();
            count += 1;
        }
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Most frequent category; ties go to the lexicographically smallest
pub fn most_frequent_category<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}
