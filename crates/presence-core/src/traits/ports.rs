//! Port traits for storage, registry, and notification backends
//!
//! All per-user operations are keyed to that user alone and may run in
//! parallel across users. Within one user the backing store's atomic
//! primitives (set add/remove, TTL'd set) serialize concurrent calls, since
//! several server processes may share the same store. No implementation may
//! hold an application-level lock across users.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::Driver;
use crate::error::DomainError;
use crate::events::AvailabilityChange;
use crate::value_objects::UserId;

/// Result type for port operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Mapping of user -> set of live connection identifiers.
///
/// Supports multiple devices per user. All operations are idempotent:
/// adding a registered id or removing an unknown id is a no-op, which
/// absorbs duplicate and out-of-order transport events.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Register a connection id under a user. Returns the live connection
    /// count after the add.
    async fn add_connection(&self, user_id: UserId, connection_id: &str) -> RepoResult<u64>;

    /// Remove a connection id. Returns the live count after the removal;
    /// a count of zero means the user just lost their last connection.
    async fn remove_connection(&self, user_id: UserId, connection_id: &str) -> RepoResult<u64>;

    /// Current live connection count for a user (0 when none)
    async fn count_connections(&self, user_id: UserId) -> RepoResult<u64>;
}

/// Durable user -> liveness mapping with expiry.
///
/// The heartbeat TTL is fixed at construction time (one configuration
/// constant across the system), never passed per call.
#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// Set state online with expiry = now + heartbeat TTL. Overwrites any
    /// existing record (refresh semantics, not append).
    async fn mark_online(&self, user_id: UserId) -> RepoResult<()>;

    /// Extend liveness on heartbeat. A missing record is re-created as
    /// online: heartbeats arriving after state loss must not fail.
    async fn refresh(&self, user_id: UserId) -> RepoResult<()>;

    /// Delete the record immediately, regardless of remaining TTL
    async fn mark_offline(&self, user_id: UserId) -> RepoResult<()>;

    /// True iff a record exists and its recorded expiry has not passed.
    /// Implementations must validate the expiry explicitly rather than
    /// trusting background eviction alone.
    async fn is_online(&self, user_id: UserId) -> RepoResult<bool>;
}

/// Durable driver profile storage
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Find a driver by id
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<Driver>>;

    /// Persist the dispatch flag; also refreshes `last_active_at` when
    /// flipping online
    async fn set_online(&self, id: UserId, online: bool) -> RepoResult<()>;

    /// Refresh `last_active_at` without touching the flag
    async fn touch_last_active(&self, id: UserId) -> RepoResult<()>;

    /// Bulk-expire every driver still flagged online whose `last_active_at`
    /// is older than `cutoff`. Returns the number of rows affected; zero
    /// when nothing is stale (the call must then be side-effect-free).
    async fn expire_stale_online(
        &self,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> RepoResult<u64>;
}

/// Shared armed/disarmed state for the dispatch debounce window.
///
/// One key per driver, shared by every server instance, holding the token
/// of the most recent `arm`. A refresh on any instance overwrites the
/// token, which invalidates the timers every other instance still has
/// scheduled: their `try_claim` finds a foreign token and loses.
#[async_trait]
pub trait DebounceStore: Send + Sync {
    /// Arm (or re-arm) the window with a fresh token. Overwrites any
    /// previous token; expires on its own after roughly `ttl_seconds` as a
    /// backstop against a crashed scheduler.
    async fn arm(&self, user_id: UserId, token: Uuid, ttl_seconds: u64) -> RepoResult<()>;

    /// Disarm the window unconditionally. No-op when not armed.
    async fn disarm(&self, user_id: UserId) -> RepoResult<()>;

    /// Atomic compare-and-delete: removes the key and returns true iff it
    /// still holds `token`. At most one caller per armed token succeeds.
    async fn try_claim(&self, user_id: UserId, token: Uuid) -> RepoResult<bool>;
}

/// Outbound channel for availability transition notifications
#[async_trait]
pub trait AvailabilityNotifier: Send + Sync {
    /// Publish a transition. Failures are for the caller to log, never to
    /// retry synchronously.
    async fn notify(&self, change: &AvailabilityChange) -> RepoResult<()>;
}
