use std::{env, str::FromStr, time::Duration};

use sampletrack_core::events::NotificationKey;
use sampletrack_core::token::{DEFAULT_SAMPLE_ID_LENGTH, DEFAULT_TOKEN_LENGTH};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "sampletrack.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Length of issued access tokens (default: 16)
    pub token_length: usize,
    /// Length of generated sample IDs (default: 10)
    pub sample_id_length: usize,
    /// Upper bound for a single storage call in milliseconds (default: 5,000)
    pub store_timeout_ms: u64,
    /// Upper bound for a whole HTTP request in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Delivery attempts per update notification (default: 3)
    pub notify_attempts: u32,
    /// Upper bound for a single notification attempt in milliseconds (default: 1,000)
    pub notify_timeout_ms: u64,
    /// Topic that update notifications are published on (default: "sample_updates")
    pub notification_topic: String,
    /// Event type of update notifications (default: "sample_updated")
    pub notification_event_type: String,
    /// Append the submitter email to the notification routing key (default: false)
    pub notification_key_with_email: bool,
    /// Topic carrying trusted update requests (default: "sample_update_requests")
    pub inbound_topic: String,
    /// Event type of trusted update requests (default: "sample_update_requested")
    pub inbound_event_type: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "sampletrack.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `TOKEN_LENGTH` - Access token length (default: 16)
    /// - `SAMPLE_ID_LENGTH` - Sample ID length (default: 10)
    /// - `STORE_TIMEOUT_MS` - Storage call timeout (default: 5,000)
    /// - `REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 10)
    /// - `NOTIFY_ATTEMPTS` - Notification delivery attempts (default: 3)
    /// - `NOTIFY_TIMEOUT_MS` - Timeout per notification attempt (default: 1,000)
    /// - `NOTIFICATION_TOPIC` - Outbound topic (default: "sample_updates")
    /// - `NOTIFICATION_EVENT_TYPE` - Outbound event type (default: "sample_updated")
    /// - `NOTIFICATION_KEY_WITH_EMAIL` - Key by ID + email (default: false)
    /// - `INBOUND_TOPIC` - Inbound topic (default: "sample_update_requests")
    /// - `INBOUND_EVENT_TYPE` - Inbound event type (default: "sample_update_requested")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            sqlite_path: string("SQLITE_PATH", "sampletrack.db"),
            redis_url: string("REDIS_URL", "redis://localhost:6379"),
            token_length: parse_var(&lookup, "TOKEN_LENGTH").unwrap_or(DEFAULT_TOKEN_LENGTH),
            sample_id_length: parse_var(&lookup, "SAMPLE_ID_LENGTH")
                .unwrap_or(DEFAULT_SAMPLE_ID_LENGTH),
            store_timeout_ms: parse_var(&lookup, "STORE_TIMEOUT_MS").unwrap_or(5_000),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS").unwrap_or(10),
            notify_attempts: parse_var::<_, u32>(&lookup, "NOTIFY_ATTEMPTS")
                .unwrap_or(3)
                .max(1),
            notify_timeout_ms: parse_var(&lookup, "NOTIFY_TIMEOUT_MS").unwrap_or(1_000),
            notification_topic: string("NOTIFICATION_TOPIC", "sample_updates"),
            notification_event_type: string("NOTIFICATION_EVENT_TYPE", "sample_updated"),
            notification_key_with_email: parse_var(&lookup, "NOTIFICATION_KEY_WITH_EMAIL")
                .unwrap_or(false),
            inbound_topic: string("INBOUND_TOPIC", "sample_update_requests"),
            inbound_event_type: string("INBOUND_EVENT_TYPE", "sample_update_requested"),
        }
    }

    /// Get the storage timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Get the per-attempt notification timeout as a Duration.
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Routing key mode for update notifications.
    pub fn notification_key(&self) -> NotificationKey {
        if self.notification_key_with_email {
            NotificationKey::SampleIdAndEmail
        } else {
            NotificationKey::SampleId
        }
    }
}

/// Looks up `key` and parses it, ignoring values that fail to parse.
fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.sqlite_path, "sampletrack.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.token_length, 16);
        assert_eq!(config.sample_id_length, 10);
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.notify_attempts, 3);
        assert_eq!(config.notify_timeout(), Duration::from_secs(1));
        assert_eq!(config.notification_topic, "sample_updates");
        assert_eq!(config.notification_event_type, "sample_updated");
        assert_eq!(config.notification_key(), NotificationKey::SampleId);
        assert_eq!(config.inbound_topic, "sample_update_requests");
        assert_eq!(config.inbound_event_type, "sample_update_requested");
    }

    #[test]
    fn test_values_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TOKEN_LENGTH", "24"),
            ("STORE_TIMEOUT_MS", "250"),
            ("NOTIFY_TIMEOUT_MS", "75"),
            ("NOTIFICATION_KEY_WITH_EMAIL", "true"),
            ("NOTIFICATION_TOPIC", "results"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.token_length, 24);
        assert_eq!(config.store_timeout(), Duration::from_millis(250));
        assert_eq!(config.notify_timeout(), Duration::from_millis(75));
        assert_eq!(config.notification_key(), NotificationKey::SampleIdAndEmail);
        assert_eq!(config.notification_topic, "results");
    }

    #[test]
    fn test_unparseable_values_fall_back_to_defaults() {
        let config = Config::from_lookup(|key| match key {
            "TOKEN_LENGTH" => Some("sixteen".to_string()),
            "NOTIFY_ATTEMPTS" => Some("0".to_string()),
            _ => None,
        });

        assert_eq!(config.token_length, 16);
        assert_eq!(config.notify_attempts, 1);
    }
}
