//! Redis error mapping.
//!
//! Dropped, refused and timed-out connections are reported as
//! `ConnectionFailed` whichever call hit them. Anything else is charged to the
//! operation that was running.

use sampletrack_core::events::EventError;

fn is_connection_error(err: &redis::RedisError) -> bool {
    err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped()
}

/// Maps an error raised while publishing.
pub fn map_publish_error(err: redis::RedisError) -> EventError {
    if is_connection_error(&err) {
        EventError::ConnectionFailed(err.to_string())
    } else {
        EventError::PublishFailed(err.to_string())
    }
}

/// Maps an error raised while subscribing or reading a subscription.
pub fn map_subscribe_error(err: redis::RedisError) -> EventError {
    if is_connection_error(&err) {
        EventError::ConnectionFailed(err.to_string())
    } else {
        EventError::SubscribeFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn refused() -> redis::RedisError {
        redis::RedisError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
    }

    fn rejected() -> redis::RedisError {
        redis::RedisError::from((redis::ErrorKind::ResponseError, "wrong number of arguments"))
    }

    #[test]
    fn test_connection_errors_are_connection_failed() {
        assert!(matches!(
            map_publish_error(refused()),
            EventError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_subscribe_error(refused()),
            EventError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_other_errors_follow_the_operation() {
        assert!(matches!(
            map_publish_error(rejected()),
            EventError::PublishFailed(_)
        ));
        assert!(matches!(
            map_subscribe_error(rejected()),
            EventError::SubscribeFailed(_)
        ));
    }
}
