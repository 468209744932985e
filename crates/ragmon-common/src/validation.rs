use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single problem found while binding or validating request input.
///
/// `name` is the offending field (dotted for nested values, e.g.
/// `metrics.0.name`) and `location` is where it was read from (`body`,
/// `query`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("parsing {name} {location} failed, because {reason}")]
    MalformedPayload {
        name: String,
        location: String,
        reason: String,
    },
    #[error("{name} in {location} {reason}")]
    ValidationFailed {
        name: String,
        location: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn malformed_payload(
        name: impl Into<String>,
        location: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::MalformedPayload {
            name: name.into(),
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation_failed(
        name: impl Into<String>,
        location: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ValidationFailed {
            name: name.into(),
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::MalformedPayload { name, .. } | Self::ValidationFailed { name, .. } => name,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::MalformedPayload { location, .. } | Self::ValidationFailed { location, .. } => {
                location
            }
        }
    }

    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}

/// Ordered list of every [`ValidationError`] collected for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeError {
    errors: Vec<ValidationError>,
}

impl CompositeError {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_malformed_payload(&self) -> bool {
        self.errors.iter().any(ValidationError::is_malformed_payload)
    }
}

impl From<Vec<ValidationError>> for CompositeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for CompositeError {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a CompositeError {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failure list:")?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositeError {}

/// Gathers errors across a sequence of checks and turns them into a single
/// outcome at the end.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<ValidationError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends every entry of `composite`, keeping its order.
    pub fn extend_from(&mut self, composite: CompositeError) {
        self.errors.extend(composite);
    }

    pub fn check(&mut self, condition: bool, error: impl FnOnce() -> ValidationError) {
        if !condition {
            self.errors.push(error());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn finish<T>(self, value: T) -> Result<T, CompositeError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(CompositeError::from(self.errors))
        }
    }

    pub fn into_result(self) -> Result<(), CompositeError> {
        self.finish(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CompositeError, ErrorCollector, ValidationError};

    #[test]
    fn empty_collector_finishes_ok() {
        let collector = ErrorCollector::new();
        assert_eq!(collector.finish(7), Ok(7));
    }

    #[test]
    fn collector_keeps_every_error_in_order() {
        let mut collector = ErrorCollector::new();
        collector.push(ValidationError::validation_failed("a", "body", "is bad"));
        collector.check(false, || {
            ValidationError::validation_failed("b", "body", "is worse")
        });
        collector.check(true, || unreachable!());

        let composite = collector.into_result().unwrap_err();
        let names: Vec<&str> = composite.iter().map(ValidationError::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn extend_from_flattens_nested_composites() {
        let nested = CompositeError::from(vec![
            ValidationError::validation_failed("x", "body", "first"),
            ValidationError::validation_failed("y", "body", "second"),
        ]);

        let mut collector = ErrorCollector::new();
        collector.push(ValidationError::malformed_payload("body", "body", "eof"));
        collector.extend_from(nested);

        assert_eq!(collector.len(), 3);
        let composite = collector.into_result().unwrap_err();
        assert!(composite.has_malformed_payload());
        assert_eq!(composite.errors()[2].name(), "y");
    }

    #[test]
    fn composite_display_lists_each_error() {
        let composite = CompositeError::from(vec![
            ValidationError::malformed_payload("body", "body", "expected value at line 1"),
            ValidationError::validation_failed("run_id", "body", "must not be blank"),
        ]);

        assert_eq!(
            composite.to_string(),
            "validation failure list:\n\
             parsing body body failed, because expected value at line 1\n\
             run_id in body must not be blank"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let error = ValidationError::validation_failed("run_id", "body", "must not be blank");
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["kind"], "validation_failed");
        assert_eq!(value["name"], "run_id");
        assert_eq!(value["location"], "body");
    }
}
