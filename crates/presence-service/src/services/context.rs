//! Service context - dependency container for the presence services
//!
//! Holds the port implementations (driver repository, presence store,
//! connection registry, availability notifier) plus the timing
//! configuration shared by every service.

use std::sync::Arc;

use presence_common::{PresenceConfig, SweepConfig};
use presence_core::{
    AvailabilityNotifier, ConnectionRegistry, DebounceStore, DriverRepository, PresenceStore,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    driver_repo: Arc<dyn DriverRepository>,
    presence_store: Arc<dyn PresenceStore>,
    registry: Arc<dyn ConnectionRegistry>,
    notifier: Arc<dyn AvailabilityNotifier>,
    debounce_store: Arc<dyn DebounceStore>,
    presence_config: PresenceConfig,
    sweep_config: SweepConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        driver_repo: Arc<dyn DriverRepository>,
        presence_store: Arc<dyn PresenceStore>,
        registry: Arc<dyn ConnectionRegistry>,
        notifier: Arc<dyn AvailabilityNotifier>,
        debounce_store: Arc<dyn DebounceStore>,
        presence_config: PresenceConfig,
        sweep_config: SweepConfig,
    ) -> Self {
        Self {
            driver_repo,
            presence_store,
            registry,
            notifier,
            debounce_store,
            presence_config,
            sweep_config,
        }
    }

    /// Get the driver repository
    pub fn driver_repo(&self) -> &Arc<dyn DriverRepository> {
        &self.driver_repo
    }

    /// Get the presence store
    pub fn presence_store(&self) -> &Arc<dyn PresenceStore> {
        &self.presence_store
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<dyn ConnectionRegistry> {
        &self.registry
    }

    /// Get the availability notifier
    pub fn notifier(&self) -> &Arc<dyn AvailabilityNotifier> {
        &self.notifier
    }

    /// Get the shared debounce token store
    pub fn debounce_store(&self) -> &Arc<dyn DebounceStore> {
        &self.debounce_store
    }

    /// Get the presence timing configuration
    pub fn presence_config(&self) -> &PresenceConfig {
        &self.presence_config
    }

    /// Get the sweep configuration
    pub fn sweep_config(&self) -> &SweepConfig {
        &self.sweep_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("presence_config", &self.presence_config)
            .field("sweep_config", &self.sweep_config)
            .finish()
    }
}
