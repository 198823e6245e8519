//! Divergence of a test gauge from a neighboring reference gauge.

use crate::core::{QcKind, QcSeries, TimeSeries};
use crate::series::{inner_join, outer_join, rolling_time_window_sums};
use crate::stats::{quantile, round_to};
use chrono::Duration;

/// Quantile of the positive (or negative) difference distribution used as
/// the normalizing scale.
const HIGH_SCALE_QUANTILE: f64 = 0.95;
const LOW_SCALE_QUANTILE: f64 = 0.05;

/// Output of [`neighborhood_divergence`]: two suspicion-index series on the
/// full test index.
#[derive(Debug, Clone)]
pub struct DivergenceResult {
    /// Test much higher than reference.
    pub high: QcSeries,
    /// Test much lower than reference.
    pub low: QcSeries,
}

/// Value divergence between a test gauge and a reference gauge.
///
/// Overlapping pairs with both values present give `diff = test - reference`.
/// The positive diffs are normalized by their own 95th percentile, the
/// negative diffs by their 5th percentile (both scales default to ±1 when
/// that half is empty), each floored at 0 and rounded to one decimal place.
/// Results are re-expanded onto the full test index; timestamps outside the
/// valid overlap stay undefined.
pub fn neighborhood_divergence(test: &TimeSeries, reference: &TimeSeries) -> DivergenceResult {
    let joined = inner_join(test, reference);
    let valid = joined.both_valid_indices();

    let diffs: Vec<f64> = valid
        .iter()
        .map(|&i| joined.left[i] - joined.right[i])
        .collect();

    let positive: Vec<f64> = diffs.iter().filter(|&&d| d > 0.0).copied().collect();
    let negative: Vec<f64> = diffs.iter().filter(|&&d| d < 0.0).copied().collect();

    let mut high_scale = quantile(&positive, HIGH_SCALE_QUANTILE);
    if !high_scale.is_finite() || high_scale <= 0.0 {
        high_scale = 1.0;
    }
    let mut low_scale = quantile(&negative, LOW_SCALE_QUANTILE);
    if !low_scale.is_finite() || low_scale >= 0.0 {
        low_scale = -1.0;
    }

    // Re-expand onto the full test index; valid overlap rows get verdicts,
    // everything else stays NaN
    let test_timestamps = test.timestamps();
    let mut high = vec![f64::NAN; test_timestamps.len()];
    let mut low = vec![f64::NAN; test_timestamps.len()];

    let mut t = 0;
    for (pos, &i) in valid.iter().enumerate() {
        let ts = joined.timestamps[i];
        while t < test_timestamps.len() && test_timestamps[t] < ts {
            t += 1;
        }
        if t < test_timestamps.len() && test_timestamps[t] == ts {
            high[t] = round_to((diffs[pos] / high_scale).max(0.0), 1);
            low[t] = round_to((diffs[pos] / low_scale).max(0.0), 1);
            t += 1;
        }
    }

    DivergenceResult {
        high: QcSeries::from_scores(test_timestamps.to_vec(), high),
        low: QcSeries::from_scores(test_timestamps.to_vec(), low),
    }
}

/// Configuration for the dry-spell divergence check.
#[derive(Debug, Clone)]
pub struct DrySpellDivergenceConfig {
    /// Trailing window length in days.
    pub window_days: i64,
    /// Minimum observations both sides must have inside the window; below
    /// this the proportion difference is undefined.
    pub min_window_observations: usize,
}

impl Default for DrySpellDivergenceConfig {
    fn default() -> Self {
        Self {
            window_days: 15,
            min_window_observations: 360,
        }
    }
}

impl DrySpellDivergenceConfig {
    pub fn window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    pub fn min_window_observations(mut self, min: usize) -> Self {
        self.min_window_observations = min;
        self
    }
}

/// Divergence of the test gauge's dry-day proportion from the reference's.
///
/// Both series are outer-joined and restricted to the overlapping
/// valid-data window. Per site, trailing rolling sums count dry
/// observations and total observations; the dry-proportion difference
/// (test − reference) is computed only where both sides effectively cover
/// the window, normalized by the 95th percentile of its own positive half
/// (default 1 when no positive differences exist), floored at 0 and rounded
/// to one decimal place. Only "test drier than reference" is of interest.
///
/// The output is indexed on the joined index inside the overlap window.
pub fn dry_spell_divergence(
    test: &TimeSeries,
    reference: &TimeSeries,
    config: &DrySpellDivergenceConfig,
) -> QcSeries {
    let joined = outer_join(test, reference);

    let first_left = joined.left.iter().position(|v| v.is_finite());
    let first_right = joined.right.iter().position(|v| v.is_finite());
    let last_left = joined.left.iter().rposition(|v| v.is_finite());
    let last_right = joined.right.iter().rposition(|v| v.is_finite());
    let (Some(fl), Some(fr), Some(ll), Some(lr)) = (first_left, first_right, last_left, last_right)
    else {
        return QcSeries::undefined(joined.timestamps, QcKind::Index);
    };
    let start = fl.max(fr);
    let end = ll.min(lr);
    if start > end {
        return QcSeries::undefined(joined.timestamps, QcKind::Index);
    }

    let timestamps = joined.timestamps[start..=end].to_vec();
    let left = &joined.left[start..=end];
    let right = &joined.right[start..=end];

    let dry_indicator = |values: &[f64]| -> Vec<f64> {
        values
            .iter()
            .map(|&v| if v == 0.0 { 1.0 } else { 0.0 })
            .collect()
    };
    let obs_indicator = |values: &[f64]| -> Vec<f64> {
        values
            .iter()
            .map(|&v| if v.is_finite() { 1.0 } else { 0.0 })
            .collect()
    };

    let window = Duration::days(config.window_days);
    let dry_test = rolling_time_window_sums(&timestamps, &dry_indicator(left), window);
    let obs_test = rolling_time_window_sums(&timestamps, &obs_indicator(left), window);
    let dry_ref = rolling_time_window_sums(&timestamps, &dry_indicator(right), window);
    let obs_ref = rolling_time_window_sums(&timestamps, &obs_indicator(right), window);

    let min_obs = config.min_window_observations as f64;
    let prop_diff: Vec<f64> = (0..timestamps.len())
        .map(|i| {
            if obs_test[i] >= min_obs && obs_ref[i] >= min_obs {
                dry_test[i] / obs_test[i] - dry_ref[i] / obs_ref[i]
            } else {
                f64::NAN
            }
        })
        .collect();

    let positive: Vec<f64> = prop_diff
        .iter()
        .filter(|&&d| d.is_finite() && d > 0.0)
        .copied()
        .collect();
    let mut scale = quantile(&positive, HIGH_SCALE_QUANTILE);
    if !scale.is_finite() || scale <= 0.0 {
        scale = 1.0;
    }

    let scores: Vec<f64> = prop_diff
        .iter()
        .map(|&d| {
            if d.is_finite() {
                round_to((d / scale).max(0.0), 1)
            } else {
                f64::NAN
            }
        })
        .collect();

    QcSeries::from_scores(timestamps, scores)
}
