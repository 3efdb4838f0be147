use thiserror::Error;

/// Errors that can occur while moving events over the bus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event bus connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Publish failed: {0}")]
    PublishFailed(String),
    #[error("Subscribe failed: {0}")]
    SubscribeFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for event operations.
pub type Result<T> = std::result::Result<T, EventError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_display() {
        let error = EventError::ConnectionFailed("timeout".to_string());
        assert_eq!(error.to_string(), "Event bus connection failed: timeout");
    }

    #[test]
    fn test_publish_failed_display() {
        let error = EventError::PublishFailed("channel closed".to_string());
        assert_eq!(error.to_string(), "Publish failed: channel closed");
    }

    #[test]
    fn test_serialization_display() {
        let error = EventError::Serialization("invalid JSON".to_string());
        assert_eq!(error.to_string(), "Serialization error: invalid JSON");
    }
}
