//! Trailing time-window rolling sums.

use chrono::{DateTime, Duration, Utc};

/// Sum each value's trailing time window.
///
/// For each position `i` the result is the sum of `values[j]` over every
/// `j` with `timestamps[j]` in the half-open window
/// `(timestamps[i] - window, timestamps[i]]`. Timestamps must be sorted
/// non-decreasing (the caller's join output already is). Runs as a single
/// two-pointer sweep.
pub fn rolling_time_window_sums(
    timestamps: &[DateTime<Utc>],
    values: &[f64],
    window: Duration,
) -> Vec<f64> {
    debug_assert_eq!(timestamps.len(), values.len());

    let mut sums = Vec::with_capacity(values.len());
    let mut running = 0.0;
    let mut tail = 0;
    for i in 0..values.len() {
        running += values[i];
        while timestamps[tail] <= timestamps[i] - window {
            running -= values[tail];
            tail += 1;
        }
        sums.push(running);
    }
    sums
}
