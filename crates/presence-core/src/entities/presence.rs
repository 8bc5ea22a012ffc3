//! Presence record - socket-level liveness with explicit expiry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Socket-level liveness state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceState {
    Online,
    Offline,
}

impl Default for PresenceState {
    fn default() -> Self {
        Self::Offline
    }
}

impl std::fmt::Display for PresenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Liveness record for a single user.
///
/// The record carries its own `expires_at` instant so that a reader can
/// validate expiry explicitly instead of trusting the backing store's
/// background eviction alone: once `expires_at` passes without a refresh the
/// record is logically offline even if the key still physically exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub user_id: UserId,
    pub state: PresenceState,
    /// Expiry instant, Unix epoch seconds
    pub expires_at: i64,
}

impl PresenceRecord {
    /// Create a fresh online record expiring `ttl_seconds` from now
    #[must_use]
    pub fn online(user_id: UserId, ttl_seconds: u64) -> Self {
        Self {
            user_id,
            state: PresenceState::Online,
            expires_at: Utc::now().timestamp() + ttl_seconds as i64,
        }
    }

    /// True iff the record is online and its expiry has not passed at `now`
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.state == PresenceState::Online && self.expires_at > now.timestamp()
    }

    /// True iff the record is online and its expiry has not passed
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.is_live_at(Utc::now())
    }
}
