use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use ragmon_common::{CompositeError, RagmonError, ValidationError};
use serde::Serialize;

pub struct ApiError(pub RagmonError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RagmonError::Validation(composite) if composite.has_malformed_payload() => {
                StatusCode::BAD_REQUEST
            }
            RagmonError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RagmonError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RagmonError::InternalError(_) | RagmonError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ErrorEntry<'a>>,
}

#[derive(Serialize)]
struct ErrorEntry<'a> {
    #[serde(flatten)]
    error: &'a ValidationError,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match &self.0 {
            RagmonError::Validation(composite) => composite
                .iter()
                .map(|error| ErrorEntry {
                    error,
                    message: error.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            code: status.as_u16(),
            error: self.0.error_code(),
            message: self.0.to_string(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RagmonError> for ApiError {
    fn from(err: RagmonError) -> Self {
        ApiError(err)
    }
}

impl From<CompositeError> for ApiError {
    fn from(err: CompositeError) -> Self {
        ApiError(RagmonError::Validation(err))
    }
}
