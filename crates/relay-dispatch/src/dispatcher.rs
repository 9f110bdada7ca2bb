//! Event dispatcher
//!
//! Routes each inbound event to its topic handler and applies the
//! per-topic notification rules.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use relay_core::metrics::names;
use relay_core::types::{
    saga_events_key, InventoryUpdatedEvent, OrderCompletedEvent, PaymentProcessedEvent, SagaEvent,
    SagaResponseEvent, Topic,
};
use relay_core::{Error, Result, NOTIFICATION_TTL_SECS};
use relay_store::AuditStore;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::NotificationProducer;

/// Products with stock below this trigger a low-stock alert
const LOW_STOCK_THRESHOLD: i64 = 10;

/// Saga step name marking successful completion
const SAGA_STEP_COMPLETED: &str = "COMPLETED";

/// Recipient for order SMS notifications.
/// TODO: resolve from the user profile service once one exists.
const SMS_RECIPIENT: &str = "+1234567890";

/// Recipient for saga outcome pushes; same user-profile gap as above.
const SAGA_PUSH_RECIPIENT: &str = "user";

/// Routes inbound events to per-topic handlers
pub struct EventDispatcher {
    producer: NotificationProducer,
    store: Arc<dyn AuditStore>,
}

impl EventDispatcher {
    pub fn new(producer: NotificationProducer, store: Arc<dyn AuditStore>) -> Self {
        Self { producer, store }
    }

    /// Handle one event. Never fails: handler errors are logged and
    /// counted so a bad event cannot take down the consumer loop.
    pub async fn dispatch(&self, topic: Topic, payload: Value) {
        if let Err(e) = self.handle(topic, payload).await {
            error!(topic = %topic, error = %e, "Error processing event");
            counter!(
                names::NOTIFICATIONS_SENT_TOTAL,
                "type" => topic.as_str(),
                "status" => "error"
            )
            .increment(1);
        }
    }

    async fn handle(&self, topic: Topic, payload: Value) -> Result<()> {
        match topic {
            Topic::OrderCompleted => self.handle_order_completed(payload).await,
            Topic::PaymentProcessed => self.handle_payment_processed(payload).await,
            Topic::InventoryUpdated => self.handle_inventory_updated(payload).await,
            Topic::SagaResponse => self.handle_saga_response(payload).await,
        }
    }

    async fn handle_order_completed(&self, payload: Value) -> Result<()> {
        let event: OrderCompletedEvent = decode(payload)?;
        let order_id = &event.order_id;
        let user_id = &event.data.user_id;

        info!(order_id, "Processing order completed notification");

        self.producer
            .send_email(
                &format!("{}@example.com", user_id),
                &format!("Order {} Confirmed", order_id),
                &format!(
                    "Your order {} has been successfully confirmed and is being processed.",
                    order_id
                ),
            )
            .await?;

        self.producer
            .send_push(
                user_id,
                "Order Confirmed",
                &format!("Your order {} is confirmed!", order_id),
                Some(json!({ "order_id": order_id })),
            )
            .await?;

        self.producer
            .send_sms(
                SMS_RECIPIENT,
                &format!("Order {} confirmed. Track your order in the app.", order_id),
            )
            .await?;

        Ok(())
    }

    async fn handle_payment_processed(&self, payload: Value) -> Result<()> {
        let event: PaymentProcessedEvent = decode(payload)?;

        info!(payment_id = %event.data.payment_id, "Processing payment notification");

        self.producer
            .send_email(
                &format!("{}@example.com", event.data.user_id),
                "Payment Received",
                &format!(
                    "Your payment (ID: {}) has been successfully processed.",
                    event.data.payment_id
                ),
            )
            .await?;

        Ok(())
    }

    async fn handle_inventory_updated(&self, payload: Value) -> Result<()> {
        let event: InventoryUpdatedEvent = decode(payload)?;

        info!(
            product_id = %event.product_id,
            quantity = event.quantity,
            "Processing inventory update notification"
        );

        if event.quantity < LOW_STOCK_THRESHOLD {
            self.producer
                .send_push(
                    "admin",
                    "Low Stock Alert",
                    &format!(
                        "Product {} has low stock: {} remaining",
                        event.product_id, event.quantity
                    ),
                    Some(json!({
                        "product_id": event.product_id,
                        "quantity": event.quantity,
                    })),
                )
                .await?;
        }

        Ok(())
    }

    async fn handle_saga_response(&self, payload: Value) -> Result<()> {
        let event: SagaResponseEvent = decode(payload)?;

        info!(
            order_id = %event.order_id,
            step = %event.step,
            success = event.success,
            "Processing saga response"
        );

        // Saga history feed for the UI; write-only from this side,
        // retention refreshed on every append.
        let record = SagaEvent {
            saga_id: event.saga_id.clone(),
            step: event.step.clone(),
            success: event.success,
            message: event.message.clone(),
            timestamp: event.timestamp.unwrap_or_else(Utc::now),
        };
        let key = saga_events_key(&event.order_id);
        let json = serde_json::to_string(&record).map_err(|e| Error::Store(e.to_string()))?;
        self.store.push_front(&key, &json).await?;
        self.store.expire(&key, NOTIFICATION_TTL_SECS).await?;

        if event.step == SAGA_STEP_COMPLETED && event.success {
            self.producer
                .send_push(
                    SAGA_PUSH_RECIPIENT,
                    "Order Completed! 🎉",
                    &format!(
                        "Your order {} has been successfully processed!",
                        event.order_id
                    ),
                    Some(json!({ "order_id": event.order_id, "saga_id": event.saga_id })),
                )
                .await?;
        } else if !event.success {
            self.producer
                .send_push(
                    SAGA_PUSH_RECIPIENT,
                    "Order Update",
                    &format!("Order {}: {}", event.order_id, event.message),
                    Some(json!({
                        "order_id": event.order_id,
                        "step": event.step,
                        "error": event.message,
                    })),
                )
                .await?;
        }

        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| Error::MalformedEvent(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::types::{Notification, NotificationContent};
    use relay_store::MemoryStore;
    use std::time::Duration;

    fn dispatcher() -> (EventDispatcher, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let producer = NotificationProducer::new(store.clone());
        (EventDispatcher::new(producer, store.clone()), store)
    }

    async fn stored_notifications(store: &MemoryStore, prefix: &str) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for key in store.keys_with_prefix(prefix).await.unwrap() {
            let data = store.get(&key).await.unwrap().unwrap();
            notifications.push(serde_json::from_str(&data).unwrap());
        }
        notifications
    }

    #[tokio::test]
    async fn test_order_completed_produces_email_push_and_sms() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(
                Topic::OrderCompleted,
                json!({ "order_id": "ord-1", "data": { "user_id": "u1" } }),
            )
            .await;

        let emails = stored_notifications(&store, "notification:email:").await;
        let pushes = stored_notifications(&store, "notification:push:").await;
        let smses = stored_notifications(&store, "notification:sms:").await;
        assert_eq!((emails.len(), pushes.len(), smses.len()), (1, 1, 1));

        match &emails[0].content {
            NotificationContent::Email { to, subject, .. } => {
                assert_eq!(to, "u1@example.com");
                assert_eq!(subject, "Order ord-1 Confirmed");
            }
            other => panic!("expected email, got {:?}", other),
        }
        match &pushes[0].content {
            NotificationContent::Push { user_id, data, .. } => {
                assert_eq!(user_id, "u1");
                assert_eq!(data["order_id"], "ord-1");
            }
            other => panic!("expected push, got {:?}", other),
        }
        match &smses[0].content {
            NotificationContent::Sms { to, message } => {
                assert_eq!(to, "+1234567890");
                assert!(message.contains("ord-1"));
            }
            other => panic!("expected sms, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_order_completed_without_user_falls_back_to_unknown() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(Topic::OrderCompleted, json!({ "order_id": "ord-2" }))
            .await;

        let emails = stored_notifications(&store, "notification:email:").await;
        match &emails[0].content {
            NotificationContent::Email { to, .. } => assert_eq!(to, "unknown@example.com"),
            other => panic!("expected email, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_order_id_is_contained() {
        let (dispatcher, store) = dispatcher();

        // Must not panic or propagate, and must not produce anything.
        dispatcher
            .dispatch(Topic::OrderCompleted, json!({ "data": { "user_id": "u1" } }))
            .await;
        assert!(stored_notifications(&store, "notification:").await.is_empty());

        // The dispatcher stays usable for the next event.
        dispatcher
            .dispatch(Topic::OrderCompleted, json!({ "order_id": "ord-3" }))
            .await;
        assert_eq!(stored_notifications(&store, "notification:").await.len(), 3);
    }

    #[tokio::test]
    async fn test_payment_processed_sends_one_email() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(
                Topic::PaymentProcessed,
                json!({ "data": { "payment_id": "pay-1", "user_id": "u2" } }),
            )
            .await;

        let all = stored_notifications(&store, "notification:").await;
        assert_eq!(all.len(), 1);
        match &all[0].content {
            NotificationContent::Email { to, subject, body } => {
                assert_eq!(to, "u2@example.com");
                assert_eq!(subject, "Payment Received");
                assert!(body.contains("pay-1"));
            }
            other => panic!("expected email, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_low_stock_boundary_is_strict() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(
                Topic::InventoryUpdated,
                json!({ "product_id": "prod-1", "quantity": 9 }),
            )
            .await;
        let pushes = stored_notifications(&store, "notification:push:").await;
        assert_eq!(pushes.len(), 1);
        match &pushes[0].content {
            NotificationContent::Push { user_id, data, .. } => {
                assert_eq!(user_id, "admin");
                assert_eq!(data["product_id"], "prod-1");
                assert_eq!(data["quantity"], 9);
            }
            other => panic!("expected push, got {:?}", other),
        }

        dispatcher
            .dispatch(
                Topic::InventoryUpdated,
                json!({ "product_id": "prod-1", "quantity": 10 }),
            )
            .await;
        assert_eq!(stored_notifications(&store, "notification:push:").await.len(), 1);
    }

    #[tokio::test]
    async fn test_saga_completed_success_appends_and_celebrates() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(
                Topic::SagaResponse,
                json!({
                    "saga_id": "saga-1",
                    "order_id": "ord-1",
                    "step": "COMPLETED",
                    "success": true,
                    "message": "Order completed successfully",
                }),
            )
            .await;

        let history = store.list("saga:events:ord-1").await;
        assert_eq!(history.len(), 1);
        let record: SagaEvent = serde_json::from_str(&history[0]).unwrap();
        assert_eq!(record.step, "COMPLETED");
        assert!(record.success);

        let pushes = stored_notifications(&store, "notification:push:").await;
        assert_eq!(pushes.len(), 1);
        match &pushes[0].content {
            NotificationContent::Push { title, data, .. } => {
                assert_eq!(title, "Order Completed! 🎉");
                assert_eq!(data["saga_id"], "saga-1");
            }
            other => panic!("expected push, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_saga_failure_appends_and_reports() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(
                Topic::SagaResponse,
                json!({
                    "saga_id": "saga-1",
                    "order_id": "ord-1",
                    "step": "PAYMENT_PROCESSED",
                    "success": false,
                    "message": "Insufficient funds",
                }),
            )
            .await;

        assert_eq!(store.list("saga:events:ord-1").await.len(), 1);

        let pushes = stored_notifications(&store, "notification:push:").await;
        assert_eq!(pushes.len(), 1);
        match &pushes[0].content {
            NotificationContent::Push { title, body, data, .. } => {
                assert_eq!(title, "Order Update");
                assert!(body.contains("Insufficient funds"));
                assert_eq!(data["step"], "PAYMENT_PROCESSED");
                assert_eq!(data["error"], "Insufficient funds");
            }
            other => panic!("expected push, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_saga_intermediate_success_appends_only() {
        let (dispatcher, store) = dispatcher();

        dispatcher
            .dispatch(
                Topic::SagaResponse,
                json!({
                    "saga_id": "saga-1",
                    "order_id": "ord-1",
                    "step": "INVENTORY_RESERVED",
                    "success": true,
                }),
            )
            .await;

        assert_eq!(store.list("saga:events:ord-1").await.len(), 1);
        assert!(stored_notifications(&store, "notification:").await.is_empty());
    }

    #[tokio::test]
    async fn test_saga_history_ttl_refreshed_on_append() {
        let (dispatcher, store) = dispatcher();
        let key = saga_events_key("ord-1");

        for step in ["INITIATED", "INVENTORY_RESERVED"] {
            dispatcher
                .dispatch(
                    Topic::SagaResponse,
                    json!({
                        "saga_id": "saga-1",
                        "order_id": "ord-1",
                        "step": step,
                        "success": true,
                    }),
                )
                .await;
        }

        assert_eq!(store.list(&key).await.len(), 2);
        let ttl = store.ttl(&key).await.unwrap();
        assert!(ttl <= Duration::from_secs(NOTIFICATION_TTL_SECS));
        assert!(ttl > Duration::from_secs(NOTIFICATION_TTL_SECS - 60));
    }
}
