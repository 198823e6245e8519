//! Cross-variable corroboration checks.
//!
//! These checks test a rainfall record against an independent weather or
//! hydrology variable observed at (or near) the same site:
//! - `sub_freezing_rain`: rain reported while the daily maximum temperature
//!   was below freezing
//! - `related_flow_events`: whether high-rain hours line up with peaks in a
//!   daily streamflow record

mod flow_events;
mod freezing;

pub use flow_events::{related_flow_events, FlowEventConfig};
pub use freezing::sub_freezing_rain;
