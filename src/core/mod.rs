//! Core data structures for rainfall quality control.

mod qc_series;
mod time_series;

pub use qc_series::{QcKind, QcSeries};
pub use time_series::TimeSeries;
