//! Audit store capability trait

use async_trait::async_trait;
use relay_core::Result;

/// Time-limited persistence of JSON records under namespaced keys,
/// with prefix scans for history queries and per-key ordered lists
/// for saga step history.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Store a JSON value under `key`, expiring after `ttl_secs`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Fetch the value stored under `key`, if it has not expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// List keys beginning with `prefix`.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Push a value onto the front of the list at `list_key`.
    async fn push_front(&self, list_key: &str, value: &str) -> Result<()>;

    /// Reset the expiry of `key` to `ttl_secs` from now.
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<()>;
}
