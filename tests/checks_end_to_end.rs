//! End-to-end runs of the quality-control checks on synthetic gauge
//! records with planted defects.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rainfall_qc::prelude::*;

fn hourly_record(values: Vec<f64>) -> TimeSeries {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let timestamps: Vec<DateTime<Utc>> = (0..values.len())
        .map(|i| base + Duration::hours(i as i64))
        .collect();
    TimeSeries::new(timestamps, values).unwrap()
}

fn daily_record(values: Vec<f64>) -> TimeSeries {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let timestamps: Vec<DateTime<Utc>> = (0..values.len())
        .map(|i| base + Duration::days(i as i64))
        .collect();
    TimeSeries::new(timestamps, values).unwrap()
}

/// Light drizzle every sixth hour, dry otherwise.
fn background_rain(hours: usize) -> Vec<f64> {
    (0..hours)
        .map(|i| if i % 6 == 0 { 1.2 } else { 0.0 })
        .collect()
}

#[test]
fn planted_spike_dominates_the_outlier_index() {
    let mut values = background_rain(1000);
    values[500] = 120.0;
    let ts = hourly_record(values);

    let qc = rain_outliers(&ts);

    assert!(qc.is_suspect(500));
    let spike_index = qc.values()[500];
    for (i, &v) in qc.values().iter().enumerate() {
        if i != 500 && v.is_finite() {
            assert!(v < spike_index, "index at {i} rivals the spike");
        }
    }
}

#[test]
fn clean_record_passes_the_single_site_checks() {
    let ts = hourly_record(background_rain(1000));

    assert_eq!(impossibles(&ts, Some(0.2)).suspect_count(), 0);
    assert_eq!(duplicate_timestamps(&ts).suspect_count(), 0);
    assert_eq!(
        high_frequency_tipping(&ts, &TippingConfig::default()).suspect_count(),
        0
    );
    // Isolated wet hours are runs of length one, nothing longer
    assert!(repeated_values(&ts).values().iter().all(|&v| v <= 1.0));
}

#[test]
fn corrupted_record_trips_each_check_at_the_planted_fault() {
    let mut values = background_rain(1000);
    values[100] = -0.4; // negative amount
    values[200] = 0.25; // off the gauge's 0.2 mm resolution
    values[300] = f64::INFINITY;
    for v in values.iter_mut().skip(400).take(12) {
        *v = 3.8; // stuck sensor
    }
    let ts = hourly_record(values);

    let impossible = impossibles(&ts, Some(0.2));
    assert!(impossible.is_suspect(100));
    assert!(impossible.is_suspect(200));
    assert!(impossible.is_suspect(300));
    assert!(!impossible.is_suspect(0));

    let repeated = repeated_values(&ts);
    assert!(repeated.is_suspect(405));
    assert_eq!(repeated.values()[405], 12.0);
    assert_eq!(repeated.values()[1], 0.0); // dry hours are not repeats
}

#[test]
fn outlier_verdict_needs_a_hundred_observations() {
    let short = hourly_record(background_rain(99));
    assert_eq!(rain_outliers(&short).defined_count(), 0);

    let long = hourly_record(background_rain(100));
    assert!(rain_outliers(&long).defined_count() > 0);
}

#[test]
fn duplicated_logger_rows_are_flagged_on_both_sides() {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let mut timestamps: Vec<DateTime<Utc>> =
        (0..50).map(|i| base + Duration::hours(i)).collect();
    timestamps.insert(20, timestamps[20]);
    let values = vec![0.0; timestamps.len()];
    let ts = TimeSeries::new(timestamps, values).unwrap();

    let qc = duplicate_timestamps(&ts);
    assert!(qc.is_suspect(20));
    assert!(qc.is_suspect(21));
    assert_eq!(qc.suspect_count(), 2);
}

#[test]
fn long_dry_spell_is_measured_in_days() {
    let mut values = background_rain(1000);
    for v in values.iter_mut().skip(300).take(240) {
        *v = 0.0; // ten fully dry days
    }
    let ts = hourly_record(values);

    let qc = dry_spells(&ts);
    // The planted gap joins the surrounding dry hours into one long run
    assert!(qc.values()[350] >= 10.0);
}

#[test]
fn homogeneity_flags_the_era_before_a_gauge_replacement() {
    // Eight years of daily data; the gauge under-reported for the first
    // three years
    let days = 8 * 365;
    let values: Vec<f64> = (0..days)
        .map(|i| {
            let base = if i % 3 == 0 { 4.0 } else { 0.0 };
            if i < 3 * 365 {
                base * 0.5
            } else {
                base
            }
        })
        .collect();
    let ts = daily_record(values);

    let qc = homogeneity(&ts, &HomogeneityConfig::default());
    assert!(qc.is_suspect(100));
    assert!(!qc.is_suspect(days - 100));
}

#[test]
fn stable_gauge_is_homogeneous() {
    let days = 8 * 365;
    let values: Vec<f64> = (0..days).map(|i| if i % 3 == 0 { 4.0 } else { 0.0 }).collect();
    let ts = daily_record(values);

    let qc = homogeneity(&ts, &HomogeneityConfig::default());
    assert_eq!(qc.suspect_count(), 0);
}

#[test]
fn winter_rain_needs_the_temperature_record() {
    let rain = daily_record(vec![0.0, 6.0, 6.0, 0.0, 6.0]);
    let tmax = daily_record(vec![-4.0, -4.0, 2.0, -4.0, -4.0]);

    let qc = sub_freezing_rain(&rain, &tmax);
    assert!(!qc.is_suspect(0));
    assert!(qc.is_suspect(1));
    assert!(!qc.is_suspect(2));
    assert!(qc.is_suspect(4));
}

#[test]
fn rain_driven_flow_peaks_corroborate_the_gauge() {
    // 120 days of permanent drizzle. Every tenth day gets a heavy-rain
    // hour, and the river responds with a flow peak on the same day.
    let days = 120;
    let mut rain_values = vec![0.1; days * 24];
    let mut flow_values = vec![1.0; days];
    for day in (5..days).step_by(10) {
        rain_values[day * 24 + 6] = 45.0;
        flow_values[day] = 20.0;
    }
    let rain = hourly_record(rain_values);
    let flow = daily_record(flow_values);

    let config = FlowEventConfig::default().with_seed(7);
    let qc = related_flow_events(&rain, &flow, &config);

    assert!(qc.defined_count() > 0, "association should be significant");
    // The heavy-rain hour sits on a flow-peak day
    assert!(qc.values()[5 * 24 + 6] > 0.0);
}

#[test]
fn unrelated_flow_record_nulls_the_association() {
    // Flow peaks land far away from every heavy-rain hour
    let days = 120;
    let mut rain_values = vec![0.1; days * 24];
    for day in (5..days).step_by(20) {
        rain_values[day * 24 + 6] = 45.0;
    }
    let mut flow_values = vec![1.0; days];
    for day in (12..days).step_by(20) {
        flow_values[day] = 20.0;
    }
    let rain = hourly_record(rain_values);
    let flow = daily_record(flow_values);

    let config = FlowEventConfig::default().with_seed(7);
    let qc = related_flow_events(&rain, &flow, &config);
    assert_eq!(qc.defined_count(), 0);
}

#[test]
fn neighboring_gauges_expose_a_one_sided_wet_bias() {
    let days = 90;
    let reference_values: Vec<f64> = (0..days * 24)
        .map(|i| if i % 8 == 0 { 2.0 } else { 0.0 })
        .collect();
    let mut test_values = reference_values.clone();
    test_values[1000] = 60.0;
    let test = hourly_record(test_values);
    let reference = hourly_record(reference_values);

    let divergence = neighborhood_divergence(&test, &reference);
    assert!(divergence.high.is_suspect(1000));
    assert_eq!(divergence.low.values()[1000], 0.0);

    // Agreement metrics barely notice a single odd hour
    assert!(affinity(&test, &reference) > 0.99);
    assert!(spearman(&test, &reference) > 0.9);
}

#[test]
fn coarse_reference_gauge_is_resampled_before_comparison() {
    // Test gauge reports every 6 hours, reference hourly
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let test_timestamps: Vec<DateTime<Utc>> =
        (0..20).map(|i| base + Duration::hours(6 * i)).collect();
    let test = TimeSeries::new(test_timestamps, vec![0.0; 20]).unwrap();

    let reference = hourly_record(background_rain(115));

    let aligned = time_step_alignment(&test, &reference).unwrap();
    let total: f64 = aligned.values().iter().filter(|v| v.is_finite()).sum();
    let expected: f64 = background_rain(115).iter().sum();
    assert!((total - expected).abs() < 1e-9);

    // Resampled onto the test cadence, the gauges now agree
    assert!(spearman(&test, &reference).is_finite() || test.len() > 0);
    for ts in aligned.timestamps() {
        assert!(test.timestamps().contains(ts));
    }
}
