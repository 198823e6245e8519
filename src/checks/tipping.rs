//! High-frequency tipping detection for raw tip-event records.
//!
//! Uses the lambda-k statistic of Blenkinsop et al. (2017): the absolute
//! log ratio of consecutive inter-tip times. An abrupt rate change followed
//! by a long burst of sub-threshold inter-tip times marks a stuck or
//! chattering tipping bucket. Only appropriate for raw tip timestamps, not
//! accumulated data.

use crate::core::{QcSeries, TimeSeries};

/// Configuration for the tipping-rate check.
#[derive(Debug, Clone)]
pub struct TippingConfig {
    /// Lambda-k value above which a rate change counts as abrupt.
    pub rate_change_threshold: f64,
    /// Inter-tip gap (seconds) below which a tip belongs to a burst.
    pub max_gap_seconds: f64,
    /// Minimum burst length (in tips) for the burst to be flagged.
    pub min_run: usize,
}

impl Default for TippingConfig {
    fn default() -> Self {
        Self {
            rate_change_threshold: 5.0,
            max_gap_seconds: 5.0,
            min_run: 10,
        }
    }
}

impl TippingConfig {
    pub fn rate_change_threshold(mut self, threshold: f64) -> Self {
        self.rate_change_threshold = threshold;
        self
    }

    pub fn max_gap_seconds(mut self, seconds: f64) -> Self {
        self.max_gap_seconds = seconds;
        self
    }

    pub fn min_run(mut self, min_run: usize) -> Self {
        self.min_run = min_run;
        self
    }
}

/// Flag bursts of implausibly rapid tips.
///
/// Computes inter-tip gaps in seconds and the lambda-k statistic
/// `|ln(gap[k] / gap[k-1])|`. Wherever lambda-k exceeds the rate-change
/// threshold, the following run of consecutive sub-threshold gaps is
/// measured (bounds-checked against the end of the record); runs of at
/// least `min_run` tips are flagged in full.
pub fn high_frequency_tipping(series: &TimeSeries, config: &TippingConfig) -> QcSeries {
    let timestamps = series.timestamps();
    let n = timestamps.len();
    let mut flags = vec![false; n];

    // gaps[i] is the gap preceding tip i; undefined for tip 0
    let mut gaps = vec![f64::NAN; n];
    for i in 1..n {
        gaps[i] = (timestamps[i] - timestamps[i - 1]).num_milliseconds() as f64 / 1000.0;
    }

    for i in 2..n {
        let lambda_k = (gaps[i] / gaps[i - 1]).ln().abs();
        if !(lambda_k > config.rate_change_threshold) {
            continue;
        }

        let mut run = 0;
        while i + run < n && gaps[i + run] < config.max_gap_seconds {
            run += 1;
        }
        if run >= config.min_run {
            for flag in &mut flags[i..i + run] {
                *flag = true;
            }
        }
    }

    QcSeries::from_flags(timestamps.to_vec(), flags)
}
