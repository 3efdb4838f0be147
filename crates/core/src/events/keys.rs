use crate::sample::SampleUpdated;

/// How the routing key of an update notification is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKey {
    /// The sample ID alone.
    #[default]
    SampleId,
    /// The sample ID followed by the submitter email.
    SampleIdAndEmail,
}

/// Returns the routing key for an update notification.
pub fn notification_key(payload: &SampleUpdated, mode: NotificationKey) -> String {
    match mode {
        NotificationKey::SampleId => payload.sample_id.clone(),
        NotificationKey::SampleIdAndEmail => {
            format!("{}{}", payload.sample_id, payload.submitter_email)
        }
    }
}

/// Returns the pub/sub channel name for a topic.
pub fn topic_channel(topic: &str) -> String {
    format!("events:{}", topic)
}
