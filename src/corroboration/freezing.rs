//! Rain reported during sub-freezing temperatures.

use crate::core::{QcSeries, TimeSeries};
use crate::series::left_join;

/// Flag observations with rainfall while the daily maximum temperature was
/// below 0 °C.
///
/// The temperature series is left-joined onto the rainfall index; rows
/// without a matching temperature observation are treated as not flagged.
pub fn sub_freezing_rain(rain: &TimeSeries, tmax: &TimeSeries) -> QcSeries {
    let joined = left_join(rain, tmax);

    let flags: Vec<bool> = joined
        .left
        .iter()
        .zip(joined.right.iter())
        .map(|(&rain_value, &tmax_value)| rain_value > 0.0 && tmax_value < 0.0)
        .collect();

    QcSeries::from_flags(joined.timestamps, flags)
}
