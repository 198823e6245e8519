//! # rainfall-qc
//!
//! Statistical quality control for rainfall time series.
//!
//! Provides a battery of QC checks that flag suspect observations in a
//! rainfall record: single-site checks (outliers, impossible values,
//! duplicate timestamps, tipping rate, dry spells, repeated values,
//! homogeneity), cross-variable corroboration (sub-freezing rain, flow-event
//! association) and cross-site comparison against a neighboring reference
//! gauge (affinity, rank correlation, divergence, time-step alignment).
//!
//! Every check is a pure function over immutable input series. Checks emit
//! graded suspicion indices or boolean flags; a NaN verdict means the check
//! could not be computed (insufficient history, insufficient overlap). No
//! check mutates its input, and none aborts on degenerate data.

#![allow(clippy::needless_range_loop)]

pub mod checks;
pub mod comparison;
pub mod core;
pub mod corroboration;
pub mod error;
pub mod series;
pub mod stats;

pub use error::{QcError, Result};

pub mod prelude {
    pub use crate::checks::{
        dry_spells, duplicate_timestamps, high_frequency_tipping, homogeneity, impossibles,
        rain_outliers, repeated_values, HomogeneityConfig, TippingConfig,
    };
    pub use crate::comparison::{
        affinity, dry_spell_divergence, neighborhood_divergence, spearman, time_step_alignment,
        DivergenceResult, DrySpellDivergenceConfig,
    };
    pub use crate::core::{QcKind, QcSeries, TimeSeries};
    pub use crate::corroboration::{related_flow_events, sub_freezing_rain, FlowEventConfig};
    pub use crate::error::{QcError, Result};
}
