//! In-memory implementations of the storage ports
//!
//! These mirror the semantics of the Redis/PostgreSQL implementations:
//! idempotent set operations in the registry, overwrite-with-expiry records
//! in the presence store, and a bulk stale-expiry update in the repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use presence_core::{
    AvailabilityChange, AvailabilityNotifier, ConnectionRegistry, DebounceStore, Driver,
    DriverRepository, PresenceRecord, PresenceStore, RepoResult, UserId,
};
use uuid::Uuid;

/// In-memory user -> connection-id sets
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    sets: Mutex<HashMap<UserId, HashSet<String>>>,
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add_connection(&self, user_id: UserId, connection_id: &str) -> RepoResult<u64> {
        let mut sets = self.sets.lock().unwrap();
        let set = sets.entry(user_id).or_default();
        set.insert(connection_id.to_string());
        Ok(set.len() as u64)
    }

    async fn remove_connection(&self, user_id: UserId, connection_id: &str) -> RepoResult<u64> {
        let mut sets = self.sets.lock().unwrap();
        let Some(set) = sets.get_mut(&user_id) else {
            return Ok(0);
        };
        set.remove(connection_id);
        let len = set.len() as u64;
        if len == 0 {
            sets.remove(&user_id);
        }
        Ok(len)
    }

    async fn count_connections(&self, user_id: UserId) -> RepoResult<u64> {
        let sets = self.sets.lock().unwrap();
        Ok(sets.get(&user_id).map_or(0, |s| s.len() as u64))
    }
}

/// In-memory presence records with the same explicit-expiry validation the
/// Redis store performs
pub struct InMemoryPresenceStore {
    records: Mutex<HashMap<UserId, PresenceRecord>>,
    heartbeat_ttl_seconds: u64,
}

impl InMemoryPresenceStore {
    pub fn new(heartbeat_ttl_seconds: u64) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            heartbeat_ttl_seconds,
        }
    }
}

#[async_trait]
impl PresenceStore for InMemoryPresenceStore {
    async fn mark_online(&self, user_id: UserId) -> RepoResult<()> {
        let record = PresenceRecord::online(user_id, self.heartbeat_ttl_seconds);
        self.records.lock().unwrap().insert(user_id, record);
        Ok(())
    }

    async fn refresh(&self, user_id: UserId) -> RepoResult<()> {
        self.mark_online(user_id).await
    }

    async fn mark_offline(&self, user_id: UserId) -> RepoResult<()> {
        self.records.lock().unwrap().remove(&user_id);
        Ok(())
    }

    async fn is_online(&self, user_id: UserId) -> RepoResult<bool> {
        let records = self.records.lock().unwrap();
        Ok(records.get(&user_id).is_some_and(PresenceRecord::is_live))
    }
}

/// In-memory driver rows
#[derive(Default)]
pub struct InMemoryDriverRepository {
    rows: Mutex<HashMap<UserId, Driver>>,
}

impl InMemoryDriverRepository {
    /// Seed a driver row
    pub fn insert(&self, driver: Driver) {
        self.rows.lock().unwrap().insert(driver.id, driver);
    }

    /// Read back a driver's dispatch flag
    pub fn is_flagged_online(&self, id: UserId) -> bool {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .is_some_and(|d| d.is_online)
    }
}

#[async_trait]
impl DriverRepository for InMemoryDriverRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<Driver>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn set_online(&self, id: UserId, online: bool) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let driver = rows
            .get_mut(&id)
            .ok_or(presence_core::DomainError::DriverNotFound(id))?;
        driver.is_online = online;
        if online {
            driver.touch();
        } else {
            driver.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn touch_last_active(&self, id: UserId) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let driver = rows
            .get_mut(&id)
            .ok_or(presence_core::DomainError::DriverNotFound(id))?;
        driver.touch();
        Ok(())
    }

    async fn expire_stale_online(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for driver in rows.values_mut() {
            if driver.is_online && driver.last_active_at < cutoff {
                driver.is_online = false;
                driver.updated_at = Utc::now();
                affected += 1;
            }
        }
        Ok(affected)
    }
}

/// Shared debounce tokens, matching the Redis store's compare-and-delete
/// claim semantics (TTL decay is not modelled; tests drive lifecycle
/// through arm/disarm/try_claim)
#[derive(Default)]
pub struct InMemoryDebounceStore {
    tokens: Mutex<HashMap<UserId, Uuid>>,
}

#[async_trait]
impl DebounceStore for InMemoryDebounceStore {
    async fn arm(&self, user_id: UserId, token: Uuid, _ttl_seconds: u64) -> RepoResult<()> {
        self.tokens.lock().unwrap().insert(user_id, token);
        Ok(())
    }

    async fn disarm(&self, user_id: UserId) -> RepoResult<()> {
        self.tokens.lock().unwrap().remove(&user_id);
        Ok(())
    }

    async fn try_claim(&self, user_id: UserId, token: Uuid) -> RepoResult<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get(&user_id) {
            Some(current) if *current == token => {
                tokens.remove(&user_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Notifier that records every published transition
#[derive(Default)]
pub struct RecordingNotifier {
    changes: Mutex<Vec<AvailabilityChange>>,
}

impl RecordingNotifier {
    /// All transitions seen so far
    pub fn changes(&self) -> Vec<AvailabilityChange> {
        self.changes.lock().unwrap().clone()
    }

    /// Transitions for one user only
    pub fn changes_for(&self, user_id: UserId) -> Vec<AvailabilityChange> {
        self.changes()
            .into_iter()
            .filter(|c| c.user_id == user_id)
            .collect()
    }
}

#[async_trait]
impl AvailabilityNotifier for RecordingNotifier {
    async fn notify(&self, change: &AvailabilityChange) -> RepoResult<()> {
        self.changes.lock().unwrap().push(change.clone());
        Ok(())
    }
}
