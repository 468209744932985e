use ragmon_common::{CompositeError, ErrorCollector, ValidationError};
use serde::{Deserialize, Serialize};

use crate::formats::{DATE_TIME, Formats};

use super::null_as_default;

const LOCATION: &str = "body";

/// A batch of metric values reported for one experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub experiment_id: String,
    pub run_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Vec<MetricValue>,
    /// RFC 3339 time the values were measured at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

impl Metrics {
    /// Checks every field and reports all problems found, in field order.
    pub fn validate(&self, formats: &Formats) -> Result<(), CompositeError> {
        let mut errors = ErrorCollector::new();

        errors.check(!self.experiment_id.trim().is_empty(), || {
            ValidationError::validation_failed("experiment_id", LOCATION, "must not be blank")
        });
        errors.check(!self.run_id.trim().is_empty(), || {
            ValidationError::validation_failed("run_id", LOCATION, "must not be blank")
        });

        if let Some(timestamp) = &self.timestamp {
            errors.check(formats.validates(DATE_TIME, timestamp), || {
                ValidationError::validation_failed(
                    "timestamp",
                    LOCATION,
                    format!("must be of type {DATE_TIME}: {timestamp:?}"),
                )
            });
        }

        for (index, metric) in self.metrics.iter().enumerate() {
            metric.validate_into(index, &mut errors);
        }

        errors.into_result()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl MetricValue {
    fn validate_into(&self, index: usize, errors: &mut ErrorCollector) {
        errors.check(!self.name.trim().is_empty(), || {
            ValidationError::validation_failed(
                format!("metrics.{index}.name"),
                LOCATION,
                "must not be blank",
            )
        });
        // JSON cannot carry NaN or infinity, so this only trips on values built in code.
        errors.check(self.value.is_finite(), || {
            ValidationError::validation_failed(
                format!("metrics.{index}.value"),
                LOCATION,
                "must be a finite number",
            )
        });
        if let Some(step) = self.step {
            errors.check(step >= 0, || {
                ValidationError::validation_failed(
                    format!("metrics.{index}.step"),
                    LOCATION,
                    format!("should be greater than or equal to 0, got {step}"),
                )
            });
        }
    }
}
