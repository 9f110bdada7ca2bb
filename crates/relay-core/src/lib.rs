//! Relay Core Library
//!
//! Shared types, configuration, and error handling for the Relay
//! notification service.

pub mod config;
pub mod error;
pub mod metrics;
pub mod types;

pub use config::RelayConfig;
pub use error::{Error, Result};

/// Service name reported by the health endpoint and logs
pub const SERVICE_NAME: &str = "notification-service";

/// Relay version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Retention window for audit records (24 hours)
pub const NOTIFICATION_TTL_SECS: u64 = 86_400;

/// Maximum number of records returned by the history query
pub const HISTORY_LIMIT: usize = 50;
