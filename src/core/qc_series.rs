//! Uniform QC output series.

use chrono::{DateTime, Utc};

/// Interpretation of the verdict values in a [`QcSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QcKind {
    /// Boolean flag: 0.0 = not suspect, 1.0 = suspect.
    Flag,
    /// Non-negative suspicion index: 0 = not suspect, larger = more suspect.
    Index,
}

/// Output of a single QC check, aligned with its primary input series.
///
/// Every check emits one of these, with the same timestamps as the input
/// rainfall series (or a documented derived index for resampled checks).
/// `NaN` means the check could not be computed for that timestamp, so a
/// caller can compose outputs from different checks uniformly.
#[derive(Debug, Clone)]
pub struct QcSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    kind: QcKind,
}

impl QcSeries {
    /// Build a flag series from booleans.
    pub fn from_flags(timestamps: Vec<DateTime<Utc>>, flags: Vec<bool>) -> Self {
        let values = flags.iter().map(|&f| if f { 1.0 } else { 0.0 }).collect();
        Self {
            timestamps,
            values,
            kind: QcKind::Flag,
        }
    }

    /// Build a suspicion-index series.
    pub fn from_scores(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        Self {
            timestamps,
            values,
            kind: QcKind::Index,
        }
    }

    /// Build an all-undefined series over the given timestamps.
    pub fn undefined(timestamps: Vec<DateTime<Utc>>, kind: QcKind) -> Self {
        let values = vec![f64::NAN; timestamps.len()];
        Self {
            timestamps,
            values,
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn kind(&self) -> QcKind {
        self.kind
    }

    /// Whether the verdict at `index` marks the observation as suspect.
    ///
    /// Undefined (NaN) verdicts are not suspect.
    pub fn is_suspect(&self, index: usize) -> bool {
        self.values
            .get(index)
            .map(|&v| v.is_finite() && v > 0.0)
            .unwrap_or(false)
    }

    /// Number of verdicts that could be computed.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Number of suspect verdicts.
    pub fn suspect_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_suspect(i)).count()
    }
}
