use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
};
use http::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::ApiError,
    params::{PostMetricsParams, has_body},
    router::ApiState,
};

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub accepted: usize,
}

pub async fn post_metrics(
    State(state): State<Arc<ApiState>>,
    request: Request,
) -> Result<Json<IngestResponse>, ApiError> {
    // Without a body there is nothing to decode, so the media type is not checked.
    let content_type = if has_body(&request) {
        request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    } else {
        None
    };
    let route = state.matched_route(content_type)?;

    let params = PostMetricsParams::bind_request(request, &route).await?;
    let Some(metrics) = params.body else {
        return Ok(Json(IngestResponse { accepted: 0 }));
    };

    let accepted = metrics.len();
    let experiment_id = metrics.experiment_id.clone();
    let run_id = metrics.run_id.clone();
    state.sink().record(metrics).await.map_err(|err| {
        warn!(error = %err, %experiment_id, %run_id, "failed to record metrics");
        ApiError::from(err)
    })?;

    info!(%experiment_id, %run_id, accepted, "metrics accepted");
    Ok(Json(IngestResponse { accepted }))
}
