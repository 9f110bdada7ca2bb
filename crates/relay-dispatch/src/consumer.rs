//! Kafka event consumer
//!
//! Single background loop pulling events one at a time and handing
//! them to the dispatcher. All failures are contained; the loop runs
//! for the lifetime of the process.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use relay_core::config::KafkaConfig;
use relay_core::metrics::names;
use relay_core::types::Topic;
use relay_core::{Error, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::EventDispatcher;

/// Kafka consumer feeding the event dispatcher
pub struct EventConsumer {
    consumer: StreamConsumer,
}

impl EventConsumer {
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "latest")
            .create()
            .map_err(|e| Error::Kafka(e.to_string()))?;

        Ok(Self { consumer })
    }

    /// Subscribe to every topic and process messages until the
    /// process exits.
    pub async fn run(&self, dispatcher: Arc<EventDispatcher>) -> Result<()> {
        let topics: Vec<&str> = Topic::ALL.iter().map(Topic::as_str).collect();
        self.consumer
            .subscribe(&topics)
            .map_err(|e| Error::Kafka(e.to_string()))?;

        info!(?topics, "Kafka consumer started");

        loop {
            match self.consumer.recv().await {
                Ok(message) => {
                    let raw_topic = message.topic().to_string();
                    counter!(names::KAFKA_MESSAGES_CONSUMED_TOTAL, "topic" => raw_topic.clone())
                        .increment(1);

                    let topic = match Topic::from_str(&raw_topic) {
                        Ok(topic) => topic,
                        Err(_) => {
                            warn!(topic = %raw_topic, "No handler for topic");
                            continue;
                        }
                    };

                    let Some(payload) = message.payload() else {
                        debug!(topic = %topic, "Skipping message with empty payload");
                        continue;
                    };

                    let start = Instant::now();
                    match serde_json::from_slice::<Value>(payload) {
                        Ok(event) => {
                            info!(topic = %topic, "Received event");
                            dispatcher.dispatch(topic, event).await;
                        }
                        Err(e) => {
                            error!(topic = %topic, error = %e, "Failed to decode event payload");
                            counter!(
                                names::NOTIFICATIONS_SENT_TOTAL,
                                "type" => topic.as_str(),
                                "status" => "error"
                            )
                            .increment(1);
                        }
                    }
                    histogram!(
                        names::NOTIFICATION_PROCESSING_DURATION_SECONDS,
                        "type" => topic.as_str()
                    )
                    .record(start.elapsed().as_secs_f64());
                }
                Err(e) => error!(error = %e, "Error receiving message"),
            }
        }
    }
}
