//! Driver entity - a registered account with dispatch availability state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Account role. A flat tag instead of an inheritance hierarchy: a driver is
/// an ordinary account with `role == Driver` plus vehicle metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Rider,
    Driver,
    Admin,
}

impl Role {
    /// Only driver accounts participate in dispatch availability
    #[must_use]
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rider => write!(f, "rider"),
            Self::Driver => write!(f, "driver"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rider" => Ok(Self::Rider),
            "driver" => Ok(Self::Driver),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// Driver entity as persisted in durable storage.
///
/// `is_online` is the coarse, business-level dispatch flag maintained by the
/// online queue and the reconciliation sweep. It is intentionally decoupled
/// from socket-level presence: a driver may briefly stay `is_online = true`
/// with zero live connections (grace window).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub vehicle: Option<String>,
    pub is_online: bool,
    pub last_active_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Create a new driver record with required fields
    pub fn new(id: UserId, name: String, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            phone,
            role: Role::Driver,
            vehicle: None,
            is_online: false,
            last_active_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set vehicle metadata
    #[must_use]
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    /// Whether the durable activity timestamp is older than `grace`
    pub fn is_stale(&self, grace: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.last_active_at > grace
    }

    /// Record fresh activity
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
        self.updated_at = self.last_active_at;
    }
}
