use std::sync::RwLock;

use async_trait::async_trait;
use ragmon_common::{RagmonError, Result};
use tracing::info;

use crate::models::Metrics;

/// Receives every payload accepted by `POST /metrics`.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn record(&self, metrics: Metrics) -> Result<()>;
}

/// Emits accepted payloads as tracing events.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl MetricsSink for LogSink {
    async fn record(&self, metrics: Metrics) -> Result<()> {
        for metric in &metrics.metrics {
            info!(
                experiment_id = %metrics.experiment_id,
                run_id = %metrics.run_id,
                name = %metric.name,
                value = metric.value,
                step = ?metric.step,
                "metric recorded"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    records: RwLock<Vec<Metrics>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Result<Vec<Metrics>> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| RagmonError::InternalError("memory sink lock poisoned".to_string()))
    }
}

#[async_trait]
impl MetricsSink for MemorySink {
    async fn record(&self, metrics: Metrics) -> Result<()> {
        self.records
            .write()
            .map_err(|_| RagmonError::InternalError("memory sink lock poisoned".to_string()))?
            .push(metrics);
        Ok(())
    }
}
