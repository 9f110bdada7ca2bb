//! In-memory audit store
//!
//! Used by tests and local development. Expiry is honored at read
//! time; nothing is evicted in the background.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use relay_core::Result;
use tokio::sync::RwLock;

use crate::AuditStore;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct ListEntry {
    values: Vec<String>,
    expires_at: Option<Instant>,
}

/// In-memory implementation of [`AuditStore`]
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    lists: RwLock<HashMap<String, ListEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining time-to-live for `key`, if present and unexpired.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        if let Some(entry) = self.entries.read().await.get(key) {
            return entry.expires_at.checked_duration_since(now);
        }
        let lists = self.lists.read().await;
        lists
            .get(key)
            .and_then(|list| list.expires_at)
            .and_then(|at| at.checked_duration_since(now))
    }

    /// Values of the list at `key`, newest first.
    pub async fn list(&self, key: &str) -> Vec<String> {
        self.lists
            .read()
            .await
            .get(key)
            .map(|list| list.values.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && entry.expires_at > now)
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn push_front(&self, list_key: &str, value: &str) -> Result<()> {
        let mut lists = self.lists.write().await;
        let entry = lists.entry(list_key.to_string()).or_insert_with(|| ListEntry {
            values: Vec::new(),
            expires_at: None,
        });
        entry.values.insert(0, value.to_string());
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_secs);
        if let Some(list) = self.lists.write().await.get_mut(key) {
            list.expires_at = Some(expires_at);
            return Ok(());
        }
        if let Some(entry) = self.entries.write().await.get_mut(key) {
            entry.expires_at = expires_at;
        }
        Ok(())
    }
}
