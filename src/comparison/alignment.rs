//! Resampling a reference record onto the test gauge's time steps.

use crate::core::TimeSeries;
use crate::error::{QcError, Result};
use crate::series::{sum_values, MissingSum};

/// Re-accumulate a reference gauge's record onto the test gauge's
/// timestamps.
///
/// Each reference observation is assigned to the earliest test timestamp at
/// or after it, so a test timestamp collects everything the reference
/// reported since the previous test timestamp. Reference observations later
/// than the last test timestamp are dropped. Bucket sums ignore missing
/// values; a bucket with no valid observation is NaN, and leading and
/// trailing NaN buckets are trimmed away.
pub fn time_step_alignment(test: &TimeSeries, reference: &TimeSeries) -> Result<TimeSeries> {
    if test.is_empty() {
        return Err(QcError::EmptyData);
    }

    let test_timestamps = test.timestamps();
    let reference_timestamps = reference.timestamps();
    let reference_values = reference.values();

    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); test_timestamps.len()];
    let mut bucket = 0;
    for (i, &ts) in reference_timestamps.iter().enumerate() {
        while bucket < test_timestamps.len() && test_timestamps[bucket] < ts {
            bucket += 1;
        }
        if bucket == test_timestamps.len() {
            break;
        }
        buckets[bucket].push(reference_values[i]);
    }

    let sums: Vec<f64> = buckets
        .iter()
        .map(|values| sum_values(values, MissingSum::Skip))
        .collect();

    // Trim the empty lead-in and tail outside the reference's coverage
    let first = sums.iter().position(|v| v.is_finite());
    let last = sums.iter().rposition(|v| v.is_finite());
    let (timestamps, values) = match (first, last) {
        (Some(first), Some(last)) => (
            test_timestamps[first..=last].to_vec(),
            sums[first..=last].to_vec(),
        ),
        _ => (Vec::new(), Vec::new()),
    };

    TimeSeries::new(timestamps, values)
}
