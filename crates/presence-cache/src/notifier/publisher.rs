//! Availability transition publisher.
//!
//! Publishes `AvailabilityChange` events to Redis channels so that dispatch
//! and other availability readers, possibly in other processes, observe
//! online/offline transitions. Exact channel naming is an implementation
//! convenience, not a compatibility contract.

use async_trait::async_trait;
use presence_core::{AvailabilityChange, AvailabilityNotifier, DomainError, RepoResult, UserId};

use crate::pool::RedisPool;

/// Channel prefix for per-user availability events
const AVAILABILITY_CHANNEL_PREFIX: &str = "availability:";
/// Channel carrying every availability transition
pub const BROADCAST_CHANNEL: &str = "availability";

/// Redis channel name for a single user's transitions
#[must_use]
pub fn availability_channel(user_id: UserId) -> String {
    format!("{AVAILABILITY_CHANNEL_PREFIX}{user_id}")
}

/// Redis Pub/Sub implementation of the `AvailabilityNotifier` port
#[derive(Clone)]
pub struct RedisAvailabilityNotifier {
    pool: RedisPool,
}

impl RedisAvailabilityNotifier {
    /// Create a new notifier
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityNotifier for RedisAvailabilityNotifier {
    async fn notify(&self, change: &AvailabilityChange) -> RepoResult<()> {
        let payload = serde_json::to_string(change)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        // Per-user channel for targeted subscribers, broadcast for dispatch
        let user_channel = availability_channel(change.user_id);
        let receivers = self
            .pool
            .publish(&user_channel, &payload)
            .await
            .map_err(DomainError::notification)?;
        self.pool
            .publish(BROADCAST_CHANNEL, &payload)
            .await
            .map_err(DomainError::notification)?;

        tracing::debug!(
            user_id = %change.user_id,
            availability = %change.availability,
            receivers = receivers,
            "Availability transition published"
        );

        Ok(())
    }
}
