//! Event-to-notification dispatch engine
//!
//! Consumes domain events from Kafka and turns each one into zero or
//! more outbound notifications, recording everything produced into
//! the audit store.

pub mod consumer;
pub mod dispatcher;
pub mod producer;

pub use consumer::EventConsumer;
pub use dispatcher::EventDispatcher;
pub use producer::NotificationProducer;
