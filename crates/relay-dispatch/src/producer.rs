//! Notification producer
//!
//! Builds channel-specific notification payloads and records them
//! into the audit store. Delivery itself is simulated; a provider
//! integration would slot in ahead of persistence without changing
//! the contract.

use std::sync::Arc;

use metrics::counter;
use relay_core::metrics::names;
use relay_core::types::Notification;
use relay_core::{Error, Result, NOTIFICATION_TTL_SECS};
use relay_store::AuditStore;
use serde_json::Value;
use tracing::info;

/// Produces notifications and persists one audit record per send
#[derive(Clone)]
pub struct NotificationProducer {
    store: Arc<dyn AuditStore>,
}

impl NotificationProducer {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Send an email notification.
    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<Notification> {
        info!(to, subject, "Sending email");
        self.commit(Notification::email(to, subject, body)).await
    }

    /// Send an SMS notification.
    pub async fn send_sms(&self, to: &str, message: &str) -> Result<Notification> {
        info!(to, message, "Sending SMS");
        self.commit(Notification::sms(to, message)).await
    }

    /// Send a push notification.
    pub async fn send_push(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
        data: Option<Value>,
    ) -> Result<Notification> {
        info!(user_id, title, "Sending push notification");
        self.commit(Notification::push(user_id, title, body, data)).await
    }

    // Invariant: the audit record is written before the send returns;
    // a notification never exists only in memory.
    async fn commit(&self, notification: Notification) -> Result<Notification> {
        let json = serde_json::to_string(&notification).map_err(|e| Error::Store(e.to_string()))?;
        self.store
            .set_with_ttl(&notification.audit_key(), &json, NOTIFICATION_TTL_SECS)
            .await?;

        counter!(
            names::NOTIFICATIONS_SENT_TOTAL,
            "type" => notification.channel().as_str(),
            "status" => "success"
        )
        .increment(1);

        Ok(notification)
    }
}
