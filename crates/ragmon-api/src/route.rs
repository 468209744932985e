use std::sync::Arc;

use crate::{consumer::Consumer, formats::Formats};

pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// What the router resolved for one request before parameters are bound.
#[derive(Clone)]
pub struct MatchedRoute {
    consumer: Arc<dyn Consumer>,
    formats: Arc<Formats>,
    body_limit: usize,
}

impl MatchedRoute {
    pub fn new(consumer: Arc<dyn Consumer>, formats: Arc<Formats>, body_limit: usize) -> Self {
        Self {
            consumer,
            formats,
            body_limit,
        }
    }

    pub fn consumer(&self) -> &dyn Consumer {
        self.consumer.as_ref()
    }

    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}
