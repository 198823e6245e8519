//! Homogeneity screening of annual rainfall totals.
//!
//! Aggregates the record to annual sums, then repeatedly applies the
//! Pettitt change-point test: while a significant change point is found,
//! everything before it is flagged and the trailing annual sub-series is
//! re-tested. The most recent homogeneous section is retained.

use crate::core::{QcKind, QcSeries, TimeSeries};
use crate::stats::pettitt_test;
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Configuration for the homogeneity check.
#[derive(Debug, Clone)]
pub struct HomogeneityConfig {
    /// Minimum record length for the check to run at all.
    pub min_observations: usize,
    /// Fraction of a year that must be observed for the annual sum to count.
    pub min_coverage: f64,
    /// A (sub-)series needs strictly more qualifying years than this to be
    /// tested.
    pub min_years: usize,
    /// Significance level for the Pettitt test.
    pub alpha: f64,
}

impl Default for HomogeneityConfig {
    fn default() -> Self {
        Self {
            min_observations: 100,
            min_coverage: 0.96,
            min_years: 3,
            alpha: 0.05,
        }
    }
}

impl HomogeneityConfig {
    pub fn min_coverage(mut self, coverage: f64) -> Self {
        self.min_coverage = coverage;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Flag the non-homogeneous early part of a record.
///
/// The output is a flag series on the native index: 1.0 marks observations
/// that fall strictly before a detected change point (a non-homogeneous
/// earlier segment, suspect), 0.0 marks the retained homogeneous section.
/// Records shorter than `min_observations`, or whose step cannot be
/// inferred, return an all-undefined series. With too few qualifying years
/// nothing can be tested and the whole record passes as homogeneous.
pub fn homogeneity(series: &TimeSeries, config: &HomogeneityConfig) -> QcSeries {
    let timestamps = series.timestamps().to_vec();
    if series.len() < config.min_observations {
        return QcSeries::undefined(timestamps, QcKind::Flag);
    }

    let Ok(step) = series.infer_step() else {
        return QcSeries::undefined(timestamps, QcKind::Flag);
    };
    let step_hours = step.num_seconds() as f64 / 3600.0;
    if step_hours <= 0.0 {
        return QcSeries::undefined(timestamps, QcKind::Flag);
    }
    let min_count = (config.min_coverage * 365.0 * 24.0 / step_hours) as usize;

    let annual = annual_sums(series, min_count);

    // Iteratively re-test the trailing sub-series; the latest significant
    // change point wins because everything before it gets flagged anyway.
    let mut cutoff: Option<DateTime<Utc>> = None;
    let mut start = 0;
    while annual.len() - start > config.min_years {
        let sums: Vec<f64> = annual[start..].iter().map(|&(_, sum)| sum).collect();
        let Some(result) = pettitt_test(&sums, config.alpha) else {
            break;
        };
        if !result.significant {
            break;
        }
        let cp_date = annual[start + result.change_point].0;
        cutoff = Some(cp_date);
        start += result.change_point + 1;
    }

    let flags: Vec<bool> = match cutoff {
        Some(cp) => timestamps.iter().map(|&t| t < cp).collect(),
        None => vec![false; timestamps.len()],
    };

    QcSeries::from_flags(timestamps, flags)
}

/// Annual totals for calendar years with at least `min_count` valid
/// observations, labeled with the year-end date.
fn annual_sums(series: &TimeSeries, min_count: usize) -> Vec<(DateTime<Utc>, f64)> {
    let timestamps = series.timestamps();
    let values = series.values();

    let mut annual = Vec::new();
    let mut i = 0;
    while i < timestamps.len() {
        let year = timestamps[i].year();
        let mut sum = 0.0;
        let mut count = 0;
        let mut j = i;
        while j < timestamps.len() && timestamps[j].year() == year {
            if values[j].is_finite() {
                sum += values[j];
                count += 1;
            }
            j += 1;
        }
        if count >= min_count {
            let label = Utc
                .with_ymd_and_hms(year, 12, 31, 0, 0, 0)
                .single()
                .unwrap_or(timestamps[j - 1]);
            annual.push((label, sum));
        }
        i = j;
    }
    annual
}
