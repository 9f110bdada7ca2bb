//! Redis-backed audit store

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use relay_core::{Error, Result};
use tracing::info;

use crate::AuditStore;

/// Audit store backed by Redis
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish()
    }
}

impl RedisStore {
    /// Connect to the Redis instance at `url`, e.g. `redis://localhost:6379`.
    /// The connection manager reconnects on failure.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(store_err)?;
        let conn = ConnectionManager::new(client).await.map_err(store_err)?;
        info!(url, "Connected to Redis audit store");
        Ok(Self { conn })
    }
}

fn store_err(e: redis::RedisError) -> Error {
    Error::Store(e.to_string())
}

#[async_trait]
impl AuditStore for RedisStore {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, value, ttl_secs).await.map_err(store_err)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(store_err)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.keys(format!("{}*", prefix)).await.map_err(store_err)
    }

    async fn push_front(&self, list_key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.lpush(list_key, value).await.map_err(store_err)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.expire(key, ttl_secs as i64).await.map_err(store_err)
    }
}
