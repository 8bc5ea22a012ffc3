//! Ports - interfaces the presence core needs from infrastructure
//!
//! The domain layer defines what it needs; the cache and database crates
//! provide the implementations (Repository pattern).

mod ports;

pub use ports::{
    AvailabilityNotifier, ConnectionRegistry, DebounceStore, DriverRepository, PresenceStore,
    RepoResult,
};
