//! Timestamp joins between two time series.
//!
//! All joins are merge scans over the (sorted, non-decreasing) timestamp
//! vectors of the two inputs. The absent side of a non-matching row is NaN.
//! Duplicate timestamps pair positionally within their equal group; the
//! cross-series checks are specified for deduplicated inputs, so this only
//! has to be well defined, not clever.

use crate::core::TimeSeries;
use chrono::{DateTime, Utc};

/// Two value vectors aligned on a shared timestamp vector.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    pub timestamps: Vec<DateTime<Utc>>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Indices where both sides hold a finite value.
    pub fn both_valid_indices(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.left[i].is_finite() && self.right[i].is_finite())
            .collect()
    }
}

/// Join keeping only timestamps present in both series.
pub fn inner_join(left: &TimeSeries, right: &TimeSeries) -> AlignedPair {
    let (lt, lv) = (left.timestamps(), left.values());
    let (rt, rv) = (right.timestamps(), right.values());

    let mut timestamps = Vec::new();
    let mut out_l = Vec::new();
    let mut out_r = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < lt.len() && j < rt.len() {
        match lt[i].cmp(&rt[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                timestamps.push(lt[i]);
                out_l.push(lv[i]);
                out_r.push(rv[j]);
                i += 1;
                j += 1;
            }
        }
    }

    AlignedPair {
        timestamps,
        left: out_l,
        right: out_r,
    }
}

/// Join keeping every timestamp of the left series; unmatched right values
/// are NaN.
pub fn left_join(left: &TimeSeries, right: &TimeSeries) -> AlignedPair {
    let (lt, lv) = (left.timestamps(), left.values());
    let (rt, rv) = (right.timestamps(), right.values());

    let mut out_r = Vec::with_capacity(lt.len());
    let mut j = 0;
    for i in 0..lt.len() {
        while j < rt.len() && rt[j] < lt[i] {
            j += 1;
        }
        if j < rt.len() && rt[j] == lt[i] {
            out_r.push(rv[j]);
        } else {
            out_r.push(f64::NAN);
        }
    }

    AlignedPair {
        timestamps: lt.to_vec(),
        left: lv.to_vec(),
        right: out_r,
    }
}

/// Join keeping every timestamp of either series; the absent side is NaN.
pub fn outer_join(left: &TimeSeries, right: &TimeSeries) -> AlignedPair {
    let (lt, lv) = (left.timestamps(), left.values());
    let (rt, rv) = (right.timestamps(), right.values());

    let mut timestamps = Vec::with_capacity(lt.len() + rt.len());
    let mut out_l = Vec::with_capacity(lt.len() + rt.len());
    let mut out_r = Vec::with_capacity(lt.len() + rt.len());

    let (mut i, mut j) = (0, 0);
    while i < lt.len() && j < rt.len() {
        match lt[i].cmp(&rt[j]) {
            std::cmp::Ordering::Less => {
                timestamps.push(lt[i]);
                out_l.push(lv[i]);
                out_r.push(f64::NAN);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                timestamps.push(rt[j]);
                out_l.push(f64::NAN);
                out_r.push(rv[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                timestamps.push(lt[i]);
                out_l.push(lv[i]);
                out_r.push(rv[j]);
                i += 1;
                j += 1;
            }
        }
    }
    while i < lt.len() {
        timestamps.push(lt[i]);
        out_l.push(lv[i]);
        out_r.push(f64::NAN);
        i += 1;
    }
    while j < rt.len() {
        timestamps.push(rt[j]);
        out_l.push(f64::NAN);
        out_r.push(rv[j]);
        j += 1;
    }

    AlignedPair {
        timestamps,
        left: out_l,
        right: out_r,
    }
}

/// How an aggregation treats non-finite values.
///
/// This is an explicit call-site parameter, not an ambient default: whether
/// a sum over a bucket that is partly (or entirely) missing reads as a real
/// total or as "unknown" is a correctness decision for each check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSum {
    /// Skip non-finite values; an all-missing input sums to NaN, never 0.
    Skip,
    /// Any non-finite value makes the whole sum NaN.
    Propagate,
}

/// Sum a slice under an explicit missing-value policy.
pub fn sum_values(values: &[f64], policy: MissingSum) -> f64 {
    match policy {
        MissingSum::Skip => {
            let mut total = 0.0;
            let mut any = false;
            for &v in values {
                if v.is_finite() {
                    total += v;
                    any = true;
                }
            }
            if any {
                total
            } else {
                f64::NAN
            }
        }
        MissingSum::Propagate => {
            if values.iter().any(|v| !v.is_finite()) {
                f64::NAN
            } else {
                values.iter().sum()
            }
        }
    }
}
