pub mod consumer;
pub mod error;
pub mod formats;
pub mod handlers;
pub mod models;
pub mod params;
pub mod route;
pub mod router;
pub mod sink;

pub use consumer::{Consumer, ConsumerRegistry, JsonConsumer};
pub use formats::Formats;
pub use models::{MetricListFilter, MetricValue, Metrics};
pub use params::PostMetricsParams;
pub use route::MatchedRoute;
pub use router::{ApiState, api_router};
pub use sink::{LogSink, MemorySink, MetricsSink};
