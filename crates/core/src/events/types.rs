use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{EventError, Result};

/// A typed message on a topic, routed by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub topic: String,
    pub event_type: String,
    pub key: String,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Builds an envelope, serializing `payload` to JSON.
    pub fn new<T: Serialize>(
        topic: impl Into<String>,
        event_type: impl Into<String>,
        key: impl Into<String>,
        payload: &T,
    ) -> Result<Self> {
        let payload =
            serde_json::to_value(payload).map_err(|e| EventError::Serialization(e.to_string()))?;
        Ok(Self {
            topic: topic.into(),
            event_type: event_type.into(),
            key: key.into(),
            payload,
        })
    }

    /// Decodes the payload into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| EventError::Serialization(e.to_string()))
    }
}
