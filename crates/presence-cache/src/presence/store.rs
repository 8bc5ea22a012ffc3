//! Liveness records in Redis.
//!
//! Each online user owns one `presence:{user_id}` key holding a JSON
//! `PresenceRecord` with a native key TTL equal to the heartbeat window.
//! Expiry is enforced twice: Redis evicts the key at TTL (active expiry),
//! and readers additionally validate the record's own `expires_at` instant
//! (lazy expiry), so a key that survives past its window is still reported
//! offline.

use async_trait::async_trait;
use presence_core::{DomainError, PresenceRecord, PresenceStore, RepoResult, UserId};

use crate::pool::RedisPool;

/// Key prefix for liveness records
const PRESENCE_PREFIX: &str = "presence:";

/// Redis-backed implementation of the `PresenceStore` port
#[derive(Clone)]
pub struct RedisPresenceStore {
    pool: RedisPool,
    heartbeat_ttl_seconds: u64,
}

impl RedisPresenceStore {
    /// Create a new store. `heartbeat_ttl_seconds` is the system-wide
    /// liveness window; it is fixed here, never passed per call.
    #[must_use]
    pub fn new(pool: RedisPool, heartbeat_ttl_seconds: u64) -> Self {
        Self {
            pool,
            heartbeat_ttl_seconds,
        }
    }

    /// Generate Redis key for a user's liveness record
    fn presence_key(user_id: UserId) -> String {
        format!("{PRESENCE_PREFIX}{user_id}")
    }

    async fn write_online(&self, user_id: UserId) -> RepoResult<()> {
        let record = PresenceRecord::online(user_id, self.heartbeat_ttl_seconds);
        let key = Self::presence_key(user_id);
        self.pool
            .set_json(&key, &record, self.heartbeat_ttl_seconds)
            .await
            .map_err(DomainError::storage)?;

        tracing::debug!(
            user_id = %user_id,
            ttl_seconds = self.heartbeat_ttl_seconds,
            "Presence refreshed"
        );

        Ok(())
    }
}

#[async_trait]
impl PresenceStore for RedisPresenceStore {
    async fn mark_online(&self, user_id: UserId) -> RepoResult<()> {
        self.write_online(user_id).await
    }

    async fn refresh(&self, user_id: UserId) -> RepoResult<()> {
        // A heartbeat after state loss simply re-creates the record;
        // overwrite semantics make the two cases identical.
        self.write_online(user_id).await
    }

    async fn mark_offline(&self, user_id: UserId) -> RepoResult<()> {
        let key = Self::presence_key(user_id);
        self.pool.delete(&key).await.map_err(DomainError::storage)?;

        tracing::debug!(user_id = %user_id, "Presence removed");
        Ok(())
    }

    async fn is_online(&self, user_id: UserId) -> RepoResult<bool> {
        let key = Self::presence_key(user_id);
        let record: Option<PresenceRecord> = self
            .pool
            .get_json(&key)
            .await
            .map_err(DomainError::storage)?;

        // Absence means offline; a surviving key is still validated against
        // its recorded expiry.
        Ok(record.is_some_and(|r| r.is_live()))
    }
}
