use ragmon_common::{CompositeError, RagmonError, Result, ValidationError};
use serde::{Deserialize, Serialize};

use crate::formats::Formats;

use super::null_as_default;

/// Filter criteria for listing stored metrics. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricListFilter {
    /// The experiment ID to filter on.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub experiment_id: String,
    /// The metric names to filter on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metric_names: Vec<String>,
    /// The experiment run IDs to filter on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub run_ids: Vec<String>,
}

impl MetricListFilter {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|err| {
            RagmonError::InternalError(format!("failed to serialize metric list filter: {err}"))
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, ValidationError> {
        serde_json::from_slice(bytes)
            .map_err(|err| ValidationError::malformed_payload("filter", "body", err))
    }

    /// Replaces `self` with the decoded filter. On error `self` is untouched.
    pub fn unmarshal_into(&mut self, bytes: &[u8]) -> std::result::Result<(), ValidationError> {
        *self = Self::from_bytes(bytes)?;
        Ok(())
    }

    /// Filters carry no constraints yet; every combination of fields is accepted.
    pub fn validate(&self, _formats: &Formats) -> std::result::Result<(), CompositeError> {
        Ok(())
    }
}

/// Encodes an optional filter; an absent filter encodes to no bytes at all.
pub fn marshal_filter(filter: Option<&MetricListFilter>) -> Result<Vec<u8>> {
    match filter {
        Some(filter) => filter.to_bytes(),
        None => Ok(Vec::new()),
    }
}
