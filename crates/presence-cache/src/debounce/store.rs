//! Dispatch debounce state in Redis.
//!
//! `online:{user_id}` holds the token of the most recent arm, with a TTL a
//! little longer than the debounce window so the scheduling timer can still
//! claim it at the deadline. Overwrite semantics make a refresh on any
//! server instance invalidate the timers on every other one: their claim
//! sees a foreign token and loses. The claim itself is a Lua
//! compare-and-delete, so exactly one timer per armed token can win.

use async_trait::async_trait;
use presence_core::{DebounceStore, DomainError, RepoResult, UserId};
use redis::AsyncCommands;
use uuid::Uuid;

use crate::pool::RedisPool;

/// Key prefix for debounce tokens
const ONLINE_PREFIX: &str = "online:";

/// Extra key lifetime past the debounce window, so a timer firing right at
/// the deadline still finds its token
const CLAIM_SLACK_SECONDS: u64 = 5;

/// Redis-backed implementation of the `DebounceStore` port
#[derive(Clone)]
pub struct RedisDebounceStore {
    pool: RedisPool,
    claim_script: redis::Script,
}

impl RedisDebounceStore {
    /// Create a new store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        // Delete the key only while it still holds the caller's token
        let claim_script = redis::Script::new(
            r"if redis.call('GET', KEYS[1]) == ARGV[1] then
                  return redis.call('DEL', KEYS[1])
              else
                  return 0
              end",
        );
        Self { pool, claim_script }
    }

    /// Generate Redis key for a user's debounce token
    fn online_key(user_id: UserId) -> String {
        format!("{ONLINE_PREFIX}{user_id}")
    }
}

#[async_trait]
impl DebounceStore for RedisDebounceStore {
    async fn arm(&self, user_id: UserId, token: Uuid, ttl_seconds: u64) -> RepoResult<()> {
        let mut conn = self.pool.get().await.map_err(DomainError::storage)?;
        conn.set_ex::<_, _, ()>(
            Self::online_key(user_id),
            token.to_string(),
            ttl_seconds + CLAIM_SLACK_SECONDS,
        )
        .await
        .map_err(DomainError::storage)?;

        tracing::trace!(user_id = %user_id, %token, "Debounce window armed");
        Ok(())
    }

    async fn disarm(&self, user_id: UserId) -> RepoResult<()> {
        let mut conn = self.pool.get().await.map_err(DomainError::storage)?;
        conn.del::<_, ()>(Self::online_key(user_id))
            .await
            .map_err(DomainError::storage)?;

        tracing::trace!(user_id = %user_id, "Debounce window disarmed");
        Ok(())
    }

    async fn try_claim(&self, user_id: UserId, token: Uuid) -> RepoResult<bool> {
        let mut conn = self.pool.get().await.map_err(DomainError::storage)?;
        let claimed: i64 = self
            .claim_script
            .key(Self::online_key(user_id))
            .arg(token.to_string())
            .invoke_async(&mut conn)
            .await
            .map_err(DomainError::storage)?;

        Ok(claimed == 1)
    }
}
