//! Association of high-rainfall hours with streamflow peak events.
//!
//! For each time step, the output carries the relative magnitude of a flow
//! peak occurring on the same day or the day after (time of concentration),
//! but only if high-rain events at this site are statistically associated
//! with flow peaks at all. Meant for daily streamflow against hourly (or
//! daily) rainfall.

use crate::core::{QcKind, QcSeries, TimeSeries};
use crate::series::left_join;
use crate::stats::{binomial_test_two_sided, find_peaks, quantile, round_to, PeakConfig};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;

/// Percentile of peak prominences used as the normalizing scale.
const PROMINENCE_QUANTILE: f64 = 0.95;
/// Percentile of positive rainfall defining a high-rain hour.
const RAIN_QUANTILE: f64 = 0.99;
/// Gap rounding bucket separating distinct rain events.
const EVENT_BUCKET_SECONDS: f64 = 12.0 * 3600.0;

/// Configuration for the flow-event association check.
#[derive(Debug, Clone)]
pub struct FlowEventConfig {
    /// Minimum peak prominence, as a fraction of the mean flow.
    pub prominence_fraction: f64,
    /// Look-around window (samples) for peak prominence bases.
    pub wlen: usize,
    /// Number of random hours drawn for the baseline likelihood.
    pub n_random_draws: usize,
    /// p-value above which flow peaks are considered uninformative.
    pub significance_level: f64,
    /// Random seed for the baseline draw (None for entropy).
    pub seed: Option<u64>,
}

impl Default for FlowEventConfig {
    fn default() -> Self {
        Self {
            prominence_fraction: 0.1,
            wlen: 3,
            n_random_draws: 10_000,
            significance_level: 0.01,
            seed: None,
        }
    }
}

impl FlowEventConfig {
    pub fn prominence_fraction(mut self, fraction: f64) -> Self {
        self.prominence_fraction = fraction;
        self
    }

    pub fn significance_level(mut self, level: f64) -> Self {
        self.significance_level = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Relative flow-peak prominence associated with each rainfall time step.
///
/// Peaks in the daily flow series are normalized against the 95th
/// percentile of their prominences and broadcast across the rainfall index
/// (the peak's day, plus one day of back-fill for time of concentration).
/// High-rain hours are grouped into events, and a two-sided binomial test
/// compares the fraction of events with a nonzero flow prominence against a
/// random-hour baseline. A non-significant association nulls the whole
/// output: flow peaks are then not corroborative for this site. Degenerate
/// inputs (no flow data, no peaks, no positive rainfall, no events) also
/// return an all-undefined series.
pub fn related_flow_events(
    rain: &TimeSeries,
    daily_flow: &TimeSeries,
    config: &FlowEventConfig,
) -> QcSeries {
    let timestamps = rain.timestamps().to_vec();

    let Some(prominence) = peak_prominence_on_rain_index(rain, daily_flow, config) else {
        return QcSeries::undefined(timestamps, QcKind::Index);
    };

    let Some((associated, total)) = high_rain_events(rain, &prominence) else {
        return QcSeries::undefined(timestamps, QcKind::Index);
    };

    // Baseline likelihood of a nonzero flow prominence at a random hour
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let draws = config.n_random_draws.min(rain.len());
    if draws == 0 {
        return QcSeries::undefined(timestamps, QcKind::Index);
    }
    let drawn_nonzero = sample(&mut rng, rain.len(), draws)
        .iter()
        .filter(|&i| prominence[i].is_finite() && prominence[i] != 0.0)
        .count();
    let baseline = drawn_nonzero as f64 / draws as f64;

    let p_value = binomial_test_two_sided(associated as u64, total as u64, baseline);
    if !p_value.is_finite() || p_value > config.significance_level {
        // No significant association: flow peaks say nothing about rain here
        return QcSeries::undefined(timestamps, QcKind::Index);
    }

    QcSeries::from_scores(timestamps, prominence)
}

/// Relative peak prominences broadcast onto the rainfall index, defaulting
/// to 0 away from peak days. None when peaks cannot be established.
fn peak_prominence_on_rain_index(
    rain: &TimeSeries,
    daily_flow: &TimeSeries,
    config: &FlowEventConfig,
) -> Option<Vec<f64>> {
    if rain.is_empty() || daily_flow.is_empty() {
        return None;
    }

    let finite: Vec<f64> = daily_flow
        .values()
        .iter()
        .filter(|v| v.is_finite())
        .copied()
        .collect();
    if finite.is_empty() {
        return None;
    }
    let mean_flow = finite.iter().sum::<f64>() / finite.len() as f64;

    let peak_config = PeakConfig::default()
        .min_height(0.0)
        .min_prominence(mean_flow * config.prominence_fraction)
        .wlen(config.wlen);
    let peaks = find_peaks(daily_flow.values(), &peak_config);
    if peaks.is_empty() {
        return None;
    }

    let p95 = quantile(&peaks.prominences, PROMINENCE_QUANTILE);
    if !p95.is_finite() || p95 <= 0.0 {
        return None;
    }

    let peak_timestamps: Vec<DateTime<Utc>> = peaks
        .indices
        .iter()
        .map(|&i| daily_flow.timestamps()[i])
        .collect();
    let relative: Vec<f64> = peaks
        .prominences
        .iter()
        .map(|&p| round_to(p / p95, 3))
        .collect();
    let peak_series = TimeSeries::new(peak_timestamps, relative).ok()?;

    let joined = left_join(rain, &peak_series);

    // Spread each peak's value across its day, then one further day back to
    // catch the rain that caused it
    let step_hours = rain.infer_step().ok()?.num_seconds() as f64 / 3600.0;
    if step_hours <= 0.0 {
        return None;
    }
    let steps_per_day = ((24.0 / step_hours) as usize).max(1);

    let mut filled = joined.right;
    fill_forward(&mut filled, steps_per_day - 1);
    fill_backward(&mut filled, steps_per_day);
    for v in &mut filled {
        if !v.is_finite() {
            *v = 0.0;
        }
    }

    Some(filled)
}

/// Group high-rain hours into events and count how many carry a nonzero
/// flow prominence. Returns (associated events, total events); None when no
/// events can be formed.
fn high_rain_events(rain: &TimeSeries, prominence: &[f64]) -> Option<(usize, usize)> {
    let positive: Vec<f64> = rain
        .values()
        .iter()
        .filter(|&&v| v > 0.0)
        .copied()
        .collect();
    let p99 = quantile(&positive, RAIN_QUANTILE);
    if !p99.is_finite() {
        return None;
    }

    let timestamps = rain.timestamps();
    let mut event_max: Vec<f64> = Vec::new();
    let mut previous: Option<DateTime<Utc>> = None;
    let mut current: Option<f64> = None;

    for i in 0..rain.len() {
        if !(rain.values()[i] > p99) {
            continue;
        }
        // A gap rounding to one or more 12-hour buckets separates events
        let new_event = match previous {
            None => true,
            Some(prev) => {
                let gap = (timestamps[i] - prev).num_seconds() as f64;
                (gap / EVENT_BUCKET_SECONDS).round() >= 1.0
            }
        };
        if new_event {
            if let Some(max) = current.take() {
                event_max.push(max);
            }
            current = Some(prominence[i]);
        } else {
            current = current.map(|m| m.max(prominence[i]));
        }
        previous = Some(timestamps[i]);
    }
    if let Some(max) = current {
        event_max.push(max);
    }

    if event_max.is_empty() {
        return None;
    }
    let associated = event_max
        .iter()
        .filter(|&&m| m.is_finite() && m != 0.0)
        .count();
    Some((associated, event_max.len()))
}

/// Forward fill NaN gaps, at most `limit` positions past a valid value.
fn fill_forward(values: &mut [f64], limit: usize) {
    let mut source: Option<(usize, f64)> = None;
    for i in 0..values.len() {
        if values[i].is_finite() {
            source = Some((i, values[i]));
        } else if let Some((j, v)) = source {
            if i - j <= limit {
                values[i] = v;
            }
        }
    }
}

/// Backward fill NaN gaps, at most `limit` positions before a valid value.
fn fill_backward(values: &mut [f64], limit: usize) {
    let mut source: Option<(usize, f64)> = None;
    for i in (0..values.len()).rev() {
        if values[i].is_finite() {
            source = Some((i, values[i]));
        } else if let Some((j, v)) = source {
            if j - i <= limit {
                values[i] = v;
            }
        }
    }
}
