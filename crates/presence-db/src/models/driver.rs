//! Driver database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the drivers table
#[derive(Debug, Clone, FromRow)]
pub struct DriverModel {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub role: String,
    pub vehicle: Option<String>,
    pub is_online: bool,
    pub last_active_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DriverModel {
    /// Whether the stored activity timestamp is older than `cutoff`
    #[inline]
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_active_at < cutoff
    }
}
