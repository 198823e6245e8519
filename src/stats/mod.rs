//! Reusable statistical pieces behind the QC checks.
//!
//! - Linear-interpolation quantiles over the finite part of a sample
//! - Average ranks with tie handling
//! - Pettitt non-parametric change-point test
//! - Local-maximum detection with windowed prominence
//! - Two-sided exact binomial test

mod binomial;
mod peaks;
mod pettitt;

pub use binomial::binomial_test_two_sided;
pub use peaks::{find_peaks, PeakConfig, PeakResult};
pub use pettitt::{pettitt_test, PettittResult};

/// Quantile of the finite values in a sample, with linear interpolation
/// between order statistics.
///
/// Non-finite values are ignored. Returns NaN for an empty (or all-missing)
/// sample or a probability outside `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let mut sorted: Vec<f64> = values.iter().filter(|v| v.is_finite()).copied().collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Round to a fixed number of decimal places. NaN passes through.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// 1-based ranks with ties assigned their average rank.
pub fn rank_average_ties(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Average of ranks i+1 ..= j+1
        let avg = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg;
        }
        i = j + 1;
    }
    ranks
}
