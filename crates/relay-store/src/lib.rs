//! Audit store backends for Relay
//!
//! Short-lived persistence of sent notifications and saga history:
//! TTL'd key/value records plus per-key ordered lists.

pub mod memory;
pub mod redis;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::AuditStore;

pub use self::redis::RedisStore;
