//! Inbound event types
//!
//! One topic per upstream event stream; payload schemas are per-topic.
//! Payloads deserialize from the raw JSON carried by the stream, so
//! optional fields take their defaults here and missing required
//! fields surface as deserialization errors at the dispatch boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::Error;

/// Inbound event topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    OrderCompleted,
    PaymentProcessed,
    InventoryUpdated,
    SagaResponse,
}

impl Topic {
    /// Every topic the consumer subscribes to
    pub const ALL: [Topic; 4] = [
        Topic::OrderCompleted,
        Topic::PaymentProcessed,
        Topic::InventoryUpdated,
        Topic::SagaResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::OrderCompleted => "order-completed",
            Topic::PaymentProcessed => "payment-processed",
            Topic::InventoryUpdated => "inventory-updated",
            Topic::SagaResponse => "saga-response",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order-completed" => Ok(Topic::OrderCompleted),
            "payment-processed" => Ok(Topic::PaymentProcessed),
            "inventory-updated" => Ok(Topic::InventoryUpdated),
            "saga-response" => Ok(Topic::SagaResponse),
            other => Err(Error::UnknownTopic(other.to_string())),
        }
    }
}

/// Payload of an `order-completed` event
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCompletedEvent {
    pub order_id: String,
    #[serde(default)]
    pub data: OrderData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderData {
    #[serde(default = "unknown_user")]
    pub user_id: String,
}

impl Default for OrderData {
    fn default() -> Self {
        Self {
            user_id: unknown_user(),
        }
    }
}

fn unknown_user() -> String {
    "unknown".to_string()
}

/// Payload of a `payment-processed` event
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentProcessedEvent {
    pub data: PaymentData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentData {
    pub payment_id: String,
    #[serde(default = "unknown_user")]
    pub user_id: String,
}

/// Payload of an `inventory-updated` event
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryUpdatedEvent {
    pub product_id: String,
    pub quantity: i64,
}

/// Payload of a `saga-response` event
#[derive(Debug, Clone, Deserialize)]
pub struct SagaResponseEvent {
    pub saga_id: String,
    pub order_id: String,
    pub step: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Absent on some producers; the handler stamps the current time.
    pub timestamp: Option<DateTime<Utc>>,
}
