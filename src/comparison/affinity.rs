//! Wet/dry affinity and rank correlation between two gauges.

use crate::core::TimeSeries;
use crate::series::inner_join;
use crate::stats::rank_average_ties;

/// Wet/dry agreement rate between a test gauge and a reference gauge.
///
/// Overlapping observations are classified per site as wet (> 0) or dry,
/// giving three combined categories: both dry, one wet, both wet. Affinity
/// is the fraction of observations in agreement. Returns 0.0 when the
/// overlap never sees both-dry or never sees both-wet (the agreement rate
/// is then not informative), and NaN when there is no overlap at all.
pub fn affinity(test: &TimeSeries, reference: &TimeSeries) -> f64 {
    let joined = inner_join(test, reference);
    if joined.is_empty() {
        return f64::NAN;
    }

    let mut both_dry = 0usize;
    let mut both_wet = 0usize;
    for i in 0..joined.len() {
        let test_wet = joined.left[i] > 0.0;
        let reference_wet = joined.right[i] > 0.0;
        match (test_wet, reference_wet) {
            (false, false) => both_dry += 1,
            (true, true) => both_wet += 1,
            _ => {}
        }
    }

    if both_dry == 0 || both_wet == 0 {
        return 0.0;
    }
    (both_dry + both_wet) as f64 / joined.len() as f64
}

/// Spearman rank correlation between the overlapping observations of two
/// gauges.
///
/// Pairs with a missing value on either side are dropped; ties receive
/// average ranks. Returns NaN for fewer than two valid pairs or a
/// zero-variance side.
pub fn spearman(test: &TimeSeries, reference: &TimeSeries) -> f64 {
    let joined = inner_join(test, reference);
    let valid = joined.both_valid_indices();
    if valid.len() < 2 {
        return f64::NAN;
    }

    let left: Vec<f64> = valid.iter().map(|&i| joined.left[i]).collect();
    let right: Vec<f64> = valid.iter().map(|&i| joined.right[i]).collect();

    pearson(&rank_average_ties(&left), &rank_average_ties(&right))
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..x.len() {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}
