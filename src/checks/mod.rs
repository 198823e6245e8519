//! Single-site rainfall QC checks.
//!
//! Each check looks at one rainfall record in isolation:
//! - `rain_outliers`: ratio to the 99th percentile of positive values
//! - `impossibles`: non-numeric, negative, or off-precision values
//! - `duplicate_timestamps`: repeated index entries
//! - `high_frequency_tipping`: implausibly rapid tip sequences
//! - `dry_spells` / `repeated_values`: run-length analyses
//! - `homogeneity`: iterative Pettitt screening of annual totals

mod homogeneity;
mod impossibles;
mod outliers;
mod spells;
mod timestamps;
mod tipping;

pub use homogeneity::{homogeneity, HomogeneityConfig};
pub use impossibles::impossibles;
pub use outliers::rain_outliers;
pub use spells::{dry_spells, repeated_values};
pub use timestamps::duplicate_timestamps;
pub use tipping::{high_frequency_tipping, TippingConfig};
