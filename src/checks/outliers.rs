//! Outlier index against the 99th percentile of positive rainfall.

use crate::core::{QcKind, QcSeries, TimeSeries};
use crate::stats::{quantile, round_to};

/// Minimum record length for the percentile base to be meaningful.
const MIN_OBSERVATIONS: usize = 100;

/// Outlier suspicion index: each observation divided by the 99th percentile
/// of the strictly positive observations, rounded to one decimal place.
///
/// Values near or above 1.0 indicate outliers; zero-rain rows score 0.
/// Records shorter than 100 observations (or with no positive rainfall at
/// all) cannot support the percentile base and return an all-undefined
/// series.
pub fn rain_outliers(series: &TimeSeries) -> QcSeries {
    let timestamps = series.timestamps().to_vec();
    if series.len() < MIN_OBSERVATIONS {
        return QcSeries::undefined(timestamps, QcKind::Index);
    }

    let positive: Vec<f64> = series
        .values()
        .iter()
        .filter(|&&v| v > 0.0)
        .copied()
        .collect();
    let ninety_ninth = quantile(&positive, 0.99);
    if !ninety_ninth.is_finite() || ninety_ninth <= 0.0 {
        return QcSeries::undefined(timestamps, QcKind::Index);
    }

    let scores: Vec<f64> = series
        .values()
        .iter()
        .map(|&v| round_to(v / ninety_ninth, 1))
        .collect();

    QcSeries::from_scores(timestamps, scores)
}
