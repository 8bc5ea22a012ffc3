//! Per-user connection sets in Redis.
//!
//! `conns:{user_id}` holds the set of live connection ids for a user.
//! Set semantics give the idempotency the transport needs: re-adding a
//! registered id and removing an unknown id are both no-ops, which absorbs
//! duplicate connect/disconnect events. `SADD`/`SREM`/`SCARD` atomicity
//! serializes concurrent operations on the same user across server
//! processes without any in-process lock.
//!
//! Connection state is ephemeral. A safety TTL, refreshed on every add,
//! bounds how long a set can outlive a crashed process; the reconciliation
//! sweep covers the driver flag in the meantime.

use async_trait::async_trait;
use presence_core::{ConnectionRegistry, DomainError, RepoResult, UserId};

use crate::pool::RedisPool;

/// Key prefix for connection sets
const CONNECTIONS_PREFIX: &str = "conns:";

/// Safety TTL multiplier applied to the heartbeat window
const SET_TTL_FACTOR: u64 = 4;

/// Redis-backed implementation of the `ConnectionRegistry` port
#[derive(Clone)]
pub struct RedisConnectionRegistry {
    pool: RedisPool,
    set_ttl_seconds: u64,
}

impl RedisConnectionRegistry {
    /// Create a new registry; the set safety TTL derives from the shared
    /// heartbeat window.
    #[must_use]
    pub fn new(pool: RedisPool, heartbeat_ttl_seconds: u64) -> Self {
        Self {
            pool,
            set_ttl_seconds: heartbeat_ttl_seconds * SET_TTL_FACTOR,
        }
    }

    /// Generate Redis key for a user's connection set
    fn connections_key(user_id: UserId) -> String {
        format!("{CONNECTIONS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl ConnectionRegistry for RedisConnectionRegistry {
    async fn add_connection(&self, user_id: UserId, connection_id: &str) -> RepoResult<u64> {
        let key = Self::connections_key(user_id);
        let count = self
            .pool
            .set_add(&key, connection_id, self.set_ttl_seconds)
            .await
            .map_err(DomainError::storage)?;

        tracing::debug!(
            user_id = %user_id,
            connection_id = %connection_id,
            live = count,
            "Connection registered"
        );

        Ok(count)
    }

    async fn remove_connection(&self, user_id: UserId, connection_id: &str) -> RepoResult<u64> {
        let key = Self::connections_key(user_id);
        let count = self
            .pool
            .set_remove(&key, connection_id)
            .await
            .map_err(DomainError::storage)?;

        tracing::debug!(
            user_id = %user_id,
            connection_id = %connection_id,
            live = count,
            "Connection removed"
        );

        Ok(count)
    }

    async fn count_connections(&self, user_id: UserId) -> RepoResult<u64> {
        let key = Self::connections_key(user_id);
        self.pool
            .set_count(&key)
            .await
            .map_err(DomainError::storage)
    }
}
