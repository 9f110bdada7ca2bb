//! Core data types

mod event;
mod notification;
mod saga;

pub use event::{
    InventoryUpdatedEvent, OrderCompletedEvent, OrderData, PaymentData, PaymentProcessedEvent,
    SagaResponseEvent, Topic,
};
pub use notification::{
    audit_key, audit_key_prefix, Channel, Notification, NotificationContent, NotificationStatus,
};
pub use saga::{saga_events_key, SagaEvent};
