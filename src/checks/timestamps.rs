//! Duplicate timestamp detection.

use crate::core::{QcSeries, TimeSeries};

/// Flag every observation whose timestamp occurs more than once.
///
/// All occurrences of a duplicated timestamp are flagged, not just the
/// surplus ones; a reviewer has no basis to prefer one duplicate over
/// another.
pub fn duplicate_timestamps(series: &TimeSeries) -> QcSeries {
    let timestamps = series.timestamps();
    let n = timestamps.len();
    let mut flags = vec![false; n];

    // Timestamps are sorted, so duplicates are adjacent
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && timestamps[j] == timestamps[i] {
            j += 1;
        }
        if j - i > 1 {
            for flag in &mut flags[i..j] {
                *flag = true;
            }
        }
        i = j;
    }

    QcSeries::from_flags(timestamps.to_vec(), flags)
}
