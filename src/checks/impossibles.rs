//! Physically impossible value detection.

use crate::core::{QcSeries, TimeSeries};

/// Relative tolerance when testing for an integer multiple of the gauge
/// precision.
const PRECISION_TOLERANCE: f64 = 1e-9;

/// Flag observations that cannot be real rainfall measurements.
///
/// An observation is flagged when its value is non-numeric (NaN or
/// infinite), negative, or — when `minimum_precision` is a positive number —
/// not an integer multiple of that precision. Non-numeric values are never
/// precision-checked; they are already flagged as non-numeric. With
/// `minimum_precision` unset (or non-positive), precision is not checked.
pub fn impossibles(series: &TimeSeries, minimum_precision: Option<f64>) -> QcSeries {
    let check_precision = minimum_precision.filter(|&p| p.is_finite() && p > 0.0);

    let flags: Vec<bool> = series
        .values()
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return true;
            }
            if v < 0.0 {
                return true;
            }
            match check_precision {
                Some(precision) => {
                    let multiples = v / precision;
                    (multiples - multiples.round()).abs() > PRECISION_TOLERANCE * multiples.abs().max(1.0)
                }
                None => false,
            }
        })
        .collect();

    QcSeries::from_flags(series.timestamps().to_vec(), flags)
}
