//! Redis connection pool built on deadpool-redis.
//!
//! Exposes the narrow command surface the presence layer needs: JSON values
//! with a TTL, key deletion, set membership with an atomic cardinality
//! read-back, and pub/sub publishing. Set mutations run as MULTI/EXEC
//! pipelines so the returned count reflects the mutation that just happened
//! even when several server processes share the same Redis.

use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
        }
    }
}

impl From<&presence_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &presence_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Redis pool operations
pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    /// Create a new Redis pool with the given configuration
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let cfg = Config::from_url(&config.url);
        let pool = cfg
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        // Redact credentials from URL for logging
        let safe_url = config.url.split('@').next_back().unwrap_or(&config.url);
        tracing::info!(
            url = %safe_url,
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    /// Create a new Redis pool from presence-common config
    pub fn from_config(config: &presence_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    /// Get a connection from the pool
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(RedisPoolError::GetConnection)
    }

    /// Ping Redis through the pool
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Write a value as JSON under `key`, expiring after `ttl_seconds`.
    /// Overwrites any existing value and resets the TTL.
    pub async fn set_json<V: serde::Serialize>(
        &self,
        key: &str,
        value: &V,
        ttl_seconds: u64,
    ) -> RedisResult<()> {
        let mut conn = self.get().await?;
        let serialized = serde_json::to_string(value)?;
        conn.set_ex::<_, _, ()>(key, &serialized, ttl_seconds).await?;
        Ok(())
    }

    /// Read a JSON value by key, `None` when absent
    pub async fn get_json<V: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> RedisResult<Option<V>> {
        let mut conn = self.get().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.get().await?;
        let deleted: i32 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Add a member to a set and refresh the set's safety TTL, returning
    /// the cardinality after the add. SADD, EXPIRE, and SCARD run in one
    /// MULTI/EXEC block so the count cannot interleave with a concurrent
    /// mutation of the same set.
    pub async fn set_add(&self, key: &str, member: &str, ttl_seconds: u64) -> RedisResult<u64> {
        let mut conn = self.get().await?;
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .sadd(key, member)
            .ignore()
            .expire(key, ttl_seconds as i64)
            .ignore()
            .scard(key)
            .query_async(&mut conn)
            .await?;
        Ok(count)
    }

    /// Remove a member from a set (no-op when absent), returning the
    /// cardinality after the removal. Atomic like `set_add`.
    pub async fn set_remove(&self, key: &str, member: &str) -> RedisResult<u64> {
        let mut conn = self.get().await?;
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .srem(key, member)
            .ignore()
            .scard(key)
            .query_async(&mut conn)
            .await?;
        Ok(count)
    }

    /// Set cardinality, 0 when the key is absent
    pub async fn set_count(&self, key: &str) -> RedisResult<u64> {
        let mut conn = self.get().await?;
        let count: u64 = conn.scard(key).await?;
        Ok(count)
    }

    /// Publish a payload to a channel, returning the receiver count
    pub async fn publish(&self, channel: &str, payload: &str) -> RedisResult<u32> {
        let mut conn = self.get().await?;
        let receivers: u32 = conn.publish(channel, payload).await?;
        Ok(receivers)
    }
}
