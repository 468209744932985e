use std::{collections::HashMap, sync::Arc};

use ragmon_common::{RagmonError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Error)]
pub enum ConsumeError {
    #[error("failed to decode {media_type} body: {source}")]
    Decode {
        media_type: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Shape(#[from] serde_json::Error),
}

/// Decodes a request body of one media type into a JSON document tree.
pub trait Consumer: Send + Sync {
    fn media_type(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> std::result::Result<Value, ConsumeError>;
}

/// Decodes `bytes` with `consumer` and maps the result onto `T`.
pub fn consume<T: DeserializeOwned>(
    consumer: &dyn Consumer,
    bytes: &[u8],
) -> std::result::Result<T, ConsumeError> {
    let value = consumer.decode(bytes)?;
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonConsumer;

impl Consumer for JsonConsumer {
    fn media_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    fn decode(&self, bytes: &[u8]) -> std::result::Result<Value, ConsumeError> {
        serde_json::from_slice(bytes).map_err(|source| ConsumeError::Decode {
            media_type: APPLICATION_JSON,
            source,
        })
    }
}

/// Picks the consumer for a request from its `Content-Type`.
#[derive(Clone)]
pub struct ConsumerRegistry {
    consumers: HashMap<String, Arc<dyn Consumer>>,
}

impl ConsumerRegistry {
    pub fn register(&mut self, consumer: Arc<dyn Consumer>) {
        self.consumers
            .insert(consumer.media_type().to_string(), consumer);
    }

    /// A missing or blank content type falls back to JSON, and so does any
    /// structured `+json` media type.
    pub fn lookup(&self, content_type: Option<&str>) -> Result<Arc<dyn Consumer>> {
        let media_type = content_type
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| APPLICATION_JSON.to_string());

        if let Some(consumer) = self.consumers.get(&media_type) {
            return Ok(Arc::clone(consumer));
        }

        if media_type.ends_with("+json") {
            if let Some(consumer) = self.consumers.get(APPLICATION_JSON) {
                return Ok(Arc::clone(consumer));
            }
        }

        Err(RagmonError::UnsupportedMediaType(media_type))
    }
}

impl Default for ConsumerRegistry {
    fn default() -> Self {
        let mut registry = Self {
            consumers: HashMap::new(),
        };
        registry.register(Arc::new(JsonConsumer));
        registry
    }
}

impl std::fmt::Debug for ConsumerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut media_types: Vec<&str> = self.consumers.keys().map(String::as_str).collect();
        media_types.sort_unstable();
        f.debug_struct("ConsumerRegistry")
            .field("media_types", &media_types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ragmon_common::RagmonError;
    use serde::Deserialize;

    use super::{APPLICATION_JSON, ConsumeError, ConsumerRegistry, JsonConsumer, consume};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        name: String,
    }

    #[test]
    fn lookup_by_content_type() {
        let registry = ConsumerRegistry::default();

        for content_type in [
            None,
            Some(""),
            Some("application/json"),
            Some("Application/JSON; charset=utf-8"),
            Some("application/vnd.ragmon.metrics+json"),
        ] {
            let consumer = registry.lookup(content_type).unwrap();
            assert_eq!(consumer.media_type(), APPLICATION_JSON);
        }

        let err = registry.lookup(Some("text/plain")).err().unwrap();
        assert!(matches!(err, RagmonError::UnsupportedMediaType(media) if media == "text/plain"));
    }

    #[test]
    fn consume_reports_syntax_and_shape_errors() {
        let probe: Probe = consume(&JsonConsumer, br#"{"name":"recall"}"#).unwrap();
        assert_eq!(probe.name, "recall");

        let syntax = consume::<Probe>(&JsonConsumer, b"{\"name\":").unwrap_err();
        assert!(matches!(syntax, ConsumeError::Decode { .. }));

        let shape = consume::<Probe>(&JsonConsumer, br#"{"name":1}"#).unwrap_err();
        assert!(matches!(shape, ConsumeError::Shape(_)));
    }
}
