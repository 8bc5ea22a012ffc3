//! Wired-up service harness for integration tests

use std::sync::Arc;

use presence_common::{PresenceConfig, SweepConfig};
use presence_core::{Driver, UserId};
use presence_service::{
    AvailabilityService, ReconciliationSweeper, ServiceContext, SessionLifecycle,
};

use crate::fixtures::{
    InMemoryConnectionRegistry, InMemoryDebounceStore, InMemoryDriverRepository,
    InMemoryPresenceStore, RecordingNotifier,
};

/// A full service stack over in-memory ports
pub struct TestHarness {
    pub repo: Arc<InMemoryDriverRepository>,
    pub store: Arc<InMemoryPresenceStore>,
    pub registry: Arc<InMemoryConnectionRegistry>,
    pub notifier: Arc<RecordingNotifier>,
    pub availability: Arc<AvailabilityService>,
    pub lifecycle: SessionLifecycle,
    pub sweeper: ReconciliationSweeper,
}

impl TestHarness {
    /// Build a harness with the given timing configuration
    pub fn new(presence: PresenceConfig, sweep: SweepConfig) -> Self {
        let repo = Arc::new(InMemoryDriverRepository::default());
        let store = Arc::new(InMemoryPresenceStore::new(presence.heartbeat_ttl_seconds));
        let registry = Arc::new(InMemoryConnectionRegistry::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let debounce = Arc::new(InMemoryDebounceStore::default());

        let ctx = ServiceContext::new(
            repo.clone(),
            store.clone(),
            registry.clone(),
            notifier.clone(),
            debounce,
            presence,
            sweep,
        );

        let availability = AvailabilityService::new(ctx.clone());
        let lifecycle = SessionLifecycle::new(ctx.clone(), availability.clone());
        let sweeper = ReconciliationSweeper::new(ctx);

        Self {
            repo,
            store,
            registry,
            notifier,
            availability,
            lifecycle,
            sweeper,
        }
    }

    /// Harness with default timings
    pub fn with_defaults() -> Self {
        Self::new(PresenceConfig::default(), SweepConfig::default())
    }

    /// Seed a driver row and return its id
    pub fn seed_driver(&self, name: &str) -> UserId {
        let id = UserId::generate();
        self.repo
            .insert(Driver::new(id, name.to_string(), "010-0000".to_string()));
        id
    }
}

/// Let spawned timer tasks run after a paused-clock advance
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
