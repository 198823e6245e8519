//! TimeSeries data structure for time-indexed observations.

use crate::error::{QcError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// A univariate time series with timestamps and values.
///
/// Timestamps must be non-decreasing but duplicates are allowed: duplicate
/// entries are real data-quality defects that the duplicate-timestamp check
/// must be able to see. A `NaN` value marks an invalid or missing
/// observation at a present timestamp.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    timezone: Option<String>,
    metadata: HashMap<String, String>,
}

impl TimeSeries {
    /// Create a new time series.
    ///
    /// Returns an error if timestamps and values differ in length or if the
    /// timestamps are not sorted in non-decreasing order.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(QcError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for i in 1..timestamps.len() {
            if timestamps[i] < timestamps[i - 1] {
                return Err(QcError::TimestampError(
                    "timestamps must be non-decreasing".to_string(),
                ));
            }
        }

        Ok(Self {
            timestamps,
            values,
            timezone: None,
            metadata: HashMap::new(),
        })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations with a finite value.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Get the original-timezone annotation, if any.
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Set the original-timezone annotation.
    pub fn set_timezone(&mut self, tz: String) {
        self.timezone = Some(tz);
    }

    /// Get metadata.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Set a metadata entry.
    pub fn set_metadata(&mut self, key: String, value: String) {
        self.metadata.insert(key, value);
    }

    /// Extract a half-open slice `[start, end)` of the series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(QcError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(QcError::InvalidParameter(format!(
                "slice end {} beyond series length {}",
                end,
                self.len()
            )));
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
            timezone: self.timezone.clone(),
            metadata: self.metadata.clone(),
        })
    }

    /// Infer the observation step as the modal spacing between consecutive
    /// timestamps.
    ///
    /// Zero-length spacings (duplicate timestamps) are ignored. Returns an
    /// error for series with fewer than two distinct timestamps.
    pub fn infer_step(&self) -> Result<Duration> {
        if self.len() < 2 {
            return Err(QcError::InsufficientData {
                needed: 2,
                got: self.len(),
            });
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for w in self.timestamps.windows(2) {
            let diff = (w[1] - w[0]).num_seconds();
            if diff > 0 {
                *counts.entry(diff).or_insert(0) += 1;
            }
        }

        let modal = counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&diff, _)| diff)
            .ok_or_else(|| {
                QcError::TimestampError("no positive spacing between timestamps".to_string())
            })?;

        Ok(Duration::seconds(modal))
    }
}
