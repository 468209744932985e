use axum::{
    body::{self, Body, HttpBody},
    extract::Request,
};
use http::{HeaderMap, header::CONTENT_LENGTH, request::Parts};
use ragmon_common::{CompositeError, ErrorCollector, ValidationError};
use tracing::debug;

use crate::{consumer::consume, models::Metrics, route::MatchedRoute};

/// Bound parameters of the `POST /metrics` operation.
#[derive(Debug)]
pub struct PostMetricsParams {
    /// Head of the request the parameters were bound from.
    pub http_request: Parts,
    /// In: body
    pub body: Option<Metrics>,
}

impl PostMetricsParams {
    /// Binds and validates `request`.
    ///
    /// A request without a body binds successfully with `body` unset. Every
    /// decoding or validation problem is reported in the returned
    /// [`CompositeError`]; `body` is only set when there are none.
    pub async fn bind_request(
        request: Request,
        route: &MatchedRoute,
    ) -> Result<Self, CompositeError> {
        let body_present = has_body(&request);
        let (http_request, request_body) = request.into_parts();
        let mut params = Self {
            http_request,
            body: None,
        };
        let mut errors = ErrorCollector::new();

        if !body_present {
            return Ok(params);
        }

        match read_body(request_body, route.body_limit()).await {
            Ok(None) => {}
            Ok(Some(bytes)) => match consume::<Metrics>(route.consumer(), &bytes) {
                Ok(body) => {
                    if let Err(problems) = body.validate(route.formats()) {
                        errors.extend_from(problems);
                    }

                    if errors.is_empty() {
                        params.body = Some(body);
                    }
                }
                Err(err) => {
                    errors.push(ValidationError::malformed_payload("body", "body", err));
                }
            },
            Err(err) => {
                errors.push(ValidationError::malformed_payload("body", "body", err));
            }
        }

        if !errors.is_empty() {
            debug!(errors = errors.len(), "post metrics binding failed");
        }
        errors.finish(params)
    }
}

/// False when the request declares `Content-Length: 0` or its body is
/// already known to be finished. A body that may still carry bytes counts
/// as present; reading it can still turn out empty.
pub fn has_body(request: &Request) -> bool {
    !declares_empty_body(request.headers()) && !request.body().is_end_stream()
}

fn declares_empty_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim() == "0")
}

/// Drains the body, which is dropped here on every path.
async fn read_body(body: Body, limit: usize) -> Result<Option<bytes::Bytes>, axum::Error> {
    let bytes = body::to_bytes(body, limit).await?;
    Ok((!bytes.is_empty()).then_some(bytes))
}
