pub mod metric_list_filter;
pub mod metrics;

pub use metric_list_filter::{MetricListFilter, marshal_filter};
pub use metrics::{MetricValue, Metrics};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
