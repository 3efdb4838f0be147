mod error;
mod keys;
mod traits;
mod types;

pub use error::{EventError, Result};
pub use keys::{notification_key, topic_channel, NotificationKey};
pub use traits::{EventBus, EventPublisher, EventSubscriber, SampleNotifier};
pub use types::EventEnvelope;
