//! Saga step history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded step of a distributed saga. The owning order id lives
/// in the list key, not the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SagaEvent {
    pub saga_id: String,
    pub step: String,
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// List key holding the saga history for an order, newest first
pub fn saga_events_key(order_id: &str) -> String {
    format!("saga:events:{}", order_id)
}
