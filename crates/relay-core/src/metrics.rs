//! Metric names
//!
//! Shared between the dispatch crate (which increments) and the API
//! crate (which renders). Existing dashboards key on these names, so
//! they are part of the service contract.

pub mod names {
    /// Notifications produced, labeled by channel type and status
    pub const NOTIFICATIONS_SENT_TOTAL: &str = "notifications_sent_total";

    /// Event handling latency, labeled by topic
    pub const NOTIFICATION_PROCESSING_DURATION_SECONDS: &str =
        "notification_processing_duration_seconds";

    /// Messages pulled from the stream, labeled by topic
    pub const KAFKA_MESSAGES_CONSUMED_TOTAL: &str = "kafka_messages_consumed_total";
}
