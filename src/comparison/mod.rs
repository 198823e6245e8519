//! Cross-site comparison checks against a neighboring reference gauge.
//!
//! - `affinity`: wet/dry agreement rate between two gauges
//! - `spearman`: rank correlation of the overlapping observations
//! - `neighborhood_divergence`: normalized value departures in both
//!   directions
//! - `dry_spell_divergence`: rolling dry-proportion departures
//! - `time_step_alignment`: resampling a reference record onto the test
//!   gauge's cadence

mod affinity;
mod alignment;
mod divergence;

pub use affinity::{affinity, spearman};
pub use alignment::time_step_alignment;
pub use divergence::{
    dry_spell_divergence, neighborhood_divergence, DivergenceResult, DrySpellDivergenceConfig,
};
