//! Online queue - debounce layer for dispatch eligibility
//!
//! Decouples "driver signaled activity" from "driver is offline". The armed
//! state lives in the shared `DebounceStore`, keyed per driver, so every
//! server instance sees the same window; the in-process timer is only the
//! scheduler. Each arm writes a fresh random token and the deadline is
//! fixed at arm time, before the timer task is spawned.
//!
//! When a timer elapses it performs an atomic compare-and-delete against
//! the stored token and fires the offline side effect only if its own token
//! was still current. A refresh (on this instance or any other) overwrites
//! the token and a removal deletes it, so a stale timer claims nothing and
//! stays silent. The side effect runs at most once per armed token.

use async_trait::async_trait;
use dashmap::DashMap;
use presence_core::{DebounceStore, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Side effect invoked when an armed window elapses without refresh
#[async_trait]
pub trait ExpiryHandler: Send + Sync {
    /// Called at most once per armed token
    async fn on_expire(&self, user_id: UserId);
}

/// Local scheduler state: the timer for this instance's most recent arm
struct TimerEntry {
    token: Uuid,
    handle: Option<JoinHandle<()>>,
}

/// Debounce queue over driver ids
pub struct OnlineQueue {
    timers: Arc<DashMap<UserId, TimerEntry>>,
    store: Arc<dyn DebounceStore>,
    ttl: Duration,
    handler: Arc<dyn ExpiryHandler>,
}

impl OnlineQueue {
    /// Create a queue firing `handler` after `ttl` of silence per id
    pub fn new(
        ttl: Duration,
        store: Arc<dyn DebounceStore>,
        handler: Arc<dyn ExpiryHandler>,
    ) -> Self {
        Self {
            timers: Arc::new(DashMap::new()),
            store,
            ttl,
            handler,
        }
    }

    /// Register (or refresh) activity for an id.
    ///
    /// absent -> pending, pending -> pending with a fresh token and timer.
    /// The shared token is overwritten, which invalidates every previously
    /// scheduled timer for this id on any instance.
    pub async fn add(&self, user_id: UserId) {
        let token = Uuid::new_v4();
        let deadline = Instant::now() + self.ttl;

        // Reserve the local slot before the timer exists so a near-zero
        // window can never elapse against a missing entry.
        if let Some(previous) = self
            .timers
            .insert(user_id, TimerEntry { token, handle: None })
        {
            if let Some(handle) = previous.handle {
                handle.abort();
            }
            tracing::trace!(user_id = %user_id, %token, "Online queue entry refreshed");
        } else {
            tracing::trace!(user_id = %user_id, %token, "Online queue entry added");
        }

        if let Err(e) = self.store.arm(user_id, token, self.ttl.as_secs()).await {
            // The claim will find nothing; the sweep backstops the flag
            tracing::warn!(user_id = %user_id, error = %e, "Failed to arm debounce window");
        }

        let timers = Arc::clone(&self.timers);
        let store = Arc::clone(&self.store);
        let handler = Arc::clone(&self.handler);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            // Drop the local entry unless a newer token already owns it
            timers.remove_if(&user_id, |_, entry| entry.token == token);

            match store.try_claim(user_id, token).await {
                Ok(true) => {
                    tracing::debug!(user_id = %user_id, %token, "Online queue entry expired");
                    handler.on_expire(user_id).await;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to claim debounce expiry");
                }
            }
        });

        // Attach the abort handle unless the entry has already moved on
        if let Some(mut entry) = self.timers.get_mut(&user_id) {
            if entry.token == token {
                entry.handle = Some(handle);
            }
        }
    }

    /// Cancel any pending window for an id (pending -> absent).
    /// No-op when absent; a cancelled timer can never claim its token.
    pub async fn remove(&self, user_id: UserId) {
        if let Some((_, entry)) = self.timers.remove(&user_id) {
            if let Some(handle) = entry.handle {
                handle.abort();
            }
            tracing::trace!(user_id = %user_id, "Online queue entry removed");
        }

        if let Err(e) = self.store.disarm(user_id).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to disarm debounce window");
        }
    }

    /// Whether this instance currently has a timer scheduled for the id
    pub fn is_pending(&self, user_id: UserId) -> bool {
        self.timers.contains_key(&user_id)
    }

    /// Number of timers scheduled on this instance
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True when no timers are scheduled on this instance
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl std::fmt::Debug for OnlineQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnlineQueue")
            .field("pending", &self.timers.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
