//! Run-length checks: dry spells and repeated values.

use crate::core::{QcSeries, TimeSeries};
use crate::series::encode_runs;

/// Length, in whole days, of the dry spell each observation sits in.
///
/// Observations are dry when the value is exactly 0. Each maximal dry run
/// scores its duration in days (last timestamp minus first, truncated to
/// whole days), broadcast to every member of the run. Wet observations
/// score 0.
pub fn dry_spells(series: &TimeSeries) -> QcSeries {
    let timestamps = series.timestamps();
    let mut scores = vec![0.0; series.len()];

    for run in encode_runs(series.values(), |&v| v == 0.0) {
        if run.value {
            let days = (timestamps[run.end] - timestamps[run.start]).num_days() as f64;
            scores[run.start..=run.end].fill(days);
        }
    }

    QcSeries::from_scores(timestamps.to_vec(), scores)
}

/// Length of the run of identical positive values each observation sits in.
///
/// Runs are taken over the raw values, so repeated zeros also form runs,
/// but only positive-valued runs are reported; zero (and non-finite) runs
/// score 0. A long run of identical positive rainfall amounts points at a
/// stuck sensor or infilled data. Not meaningful for raw tip records.
pub fn repeated_values(series: &TimeSeries) -> QcSeries {
    let mut scores = vec![0.0; series.len()];

    for run in encode_runs(series.values(), |&v| v) {
        if run.value > 0.0 && run.value.is_finite() {
            scores[run.start..=run.end].fill(run.len() as f64);
        }
    }

    QcSeries::from_scores(series.timestamps().to_vec(), scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn daily_series(values: Vec<f64>) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    fn hourly_series(values: Vec<f64>) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| base + Duration::hours(i as i64))
            .collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn five_day_dry_run_scores_five_throughout() {
        // Six consecutive dry daily observations span five days
        let mut values = vec![1.0, 2.0];
        values.extend(vec![0.0; 6]);
        values.push(3.0);
        let series = daily_series(values);

        let qc = dry_spells(&series);
        for i in 2..8 {
            assert_eq!(qc.values()[i], 5.0, "index {i}");
        }
        assert_eq!(qc.values()[0], 0.0);
        assert_eq!(qc.values()[8], 0.0);
    }

    #[test]
    fn wet_observations_score_zero() {
        let series = daily_series(vec![1.0, 0.5, 2.0]);
        let qc = dry_spells(&series);
        assert!(qc.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn sub_daily_dry_run_counts_whole_days() {
        // 30 dry hours span one whole day
        let mut values = vec![1.0];
        values.extend(vec![0.0; 31]);
        values.push(1.0);
        let series = hourly_series(values);

        let qc = dry_spells(&series);
        assert_eq!(qc.values()[1], 1.0);
        assert_eq!(qc.values()[31], 1.0);
    }

    #[test]
    fn separate_dry_runs_score_independently() {
        let values = vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        let series = daily_series(values);

        let qc = dry_spells(&series);
        assert_eq!(qc.values()[0], 1.0);
        assert_eq!(qc.values()[1], 1.0);
        assert_eq!(qc.values()[2], 0.0);
        assert_eq!(qc.values()[3], 2.0);
        assert_eq!(qc.values()[5], 2.0);
    }

    #[test]
    fn repeated_positive_run_reports_its_length() {
        let values = vec![0.0, 1.2, 1.2, 1.2, 1.2, 0.5];
        let series = hourly_series(values);

        let qc = repeated_values(&series);
        assert_eq!(qc.values()[0], 0.0);
        for i in 1..5 {
            assert_eq!(qc.values()[i], 4.0, "index {i}");
        }
        assert_eq!(qc.values()[5], 1.0);
    }

    #[test]
    fn repeated_zeros_are_not_flagged() {
        let series = hourly_series(vec![0.0; 20]);
        let qc = repeated_values(&series);
        assert!(qc.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn nan_breaks_repeated_runs_and_scores_zero() {
        let values = vec![2.0, 2.0, f64::NAN, 2.0, 2.0];
        let series = hourly_series(values);

        let qc = repeated_values(&series);
        assert_eq!(qc.values()[0], 2.0);
        assert_eq!(qc.values()[1], 2.0);
        assert_eq!(qc.values()[2], 0.0);
        assert_eq!(qc.values()[3], 2.0);
        assert_eq!(qc.values()[4], 2.0);
    }

    #[test]
    fn empty_series() {
        let series = daily_series(vec![]);
        assert!(dry_spells(&series).is_empty());
        assert!(repeated_values(&series).is_empty());
    }
}
