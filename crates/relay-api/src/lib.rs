//! HTTP surface for the notification service
//!
//! Health, Prometheus metrics, manual sends, and the notification
//! history query. The background consumer shares nothing with these
//! handlers except the audit store and the metrics recorder.

pub mod metrics;
pub mod routes;
pub mod server;

pub use metrics::MetricsRecorder;
pub use server::{create_router, ApiServer, AppState};
