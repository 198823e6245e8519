//! Series machinery shared by the QC checks.
//!
//! This module provides:
//! - Timestamp joins between two series (inner/left/outer merge scans)
//! - Run-length encoding over arbitrary categories
//! - Trailing time-window rolling sums

mod align;
mod rolling;
mod runs;

pub use align::{inner_join, left_join, outer_join, sum_values, AlignedPair, MissingSum};
pub use rolling::rolling_time_window_sums;
pub use runs::{encode_runs, Run};
