use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
    routing::{get, post},
};
use ragmon_common::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Span, info};

use crate::{
    consumer::ConsumerRegistry,
    formats::Formats,
    handlers,
    route::{DEFAULT_BODY_LIMIT, MatchedRoute},
    sink::MetricsSink,
};

pub struct ApiState {
    sink: Arc<dyn MetricsSink>,
    consumers: ConsumerRegistry,
    formats: Arc<Formats>,
    body_limit: usize,
}

impl ApiState {
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            sink,
            consumers: ConsumerRegistry::default(),
            formats: Arc::new(Formats::default()),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn with_formats(mut self, formats: Formats) -> Self {
        self.formats = Arc::new(formats);
        self
    }

    pub fn sink(&self) -> Arc<dyn MetricsSink> {
        Arc::clone(&self.sink)
    }

    pub fn matched_route(&self, content_type: Option<&str>) -> Result<MatchedRoute> {
        let consumer = self.consumers.lookup(content_type)?;
        Ok(MatchedRoute::new(
            consumer,
            Arc::clone(&self.formats),
            self.body_limit,
        ))
    }
}

pub fn api_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health/live", get(handlers::health::health_live))
        .route("/metrics", post(handlers::metrics::post_metrics))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        path = %req.uri().path(),
                    )
                })
                .on_request(|req: &Request<Body>, _span: &Span| {
                    info!("received request \"{} {}\"", req.method(), req.uri().path());
                })
                .on_response(|res: &Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = %res.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                }),
        )
        // Browser dashboards call the API from other origins, with credentials.
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
