//! Availability transition events
//!
//! Emitted whenever a driver's dispatch eligibility flips. Consumed by
//! trip-matching and any other availability readers; delivery is
//! fire-and-forget from the presence layer's point of view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Dispatch-level availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Online,
    Offline,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "ONLINE"),
            Self::Offline => write!(f, "OFFLINE"),
        }
    }
}

/// A single availability transition for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityChange {
    pub user_id: UserId,
    pub availability: Availability,
    pub occurred_at: DateTime<Utc>,
}

impl AvailabilityChange {
    /// Build an ONLINE transition stamped now
    #[must_use]
    pub fn online(user_id: UserId) -> Self {
        Self {
            user_id,
            availability: Availability::Online,
            occurred_at: Utc::now(),
        }
    }

    /// Build an OFFLINE transition stamped now
    #[must_use]
    pub fn offline(user_id: UserId) -> Self {
        Self {
            user_id,
            availability: Availability::Offline,
            occurred_at: Utc::now(),
        }
    }
}
