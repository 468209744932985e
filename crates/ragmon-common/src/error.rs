use thiserror::Error;

use crate::validation::CompositeError;

#[derive(Debug, Error)]
pub enum RagmonError {
    #[error(transparent)]
    Validation(#[from] CompositeError),
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("internal error: {0}")]
    InternalError(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RagmonError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(composite) if composite.has_malformed_payload() => "MalformedPayload",
            Self::Validation(_) => "ValidationFailed",
            Self::UnsupportedMediaType(_) => "UnsupportedMediaType",
            Self::InternalError(_) | Self::Io(_) => "InternalError",
        }
    }
}

pub type Result<T> = std::result::Result<T, RagmonError>;
