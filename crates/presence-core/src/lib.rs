//! # presence-core
//!
//! Domain layer containing entities, value objects, ports, and domain events
//! for driver presence tracking. This crate has zero dependencies on
//! infrastructure (Redis, database, transport, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Driver, PresenceRecord, PresenceState, Role};
pub use error::DomainError;
pub use events::{Availability, AvailabilityChange};
pub use traits::{
    AvailabilityNotifier, ConnectionRegistry, DebounceStore, DriverRepository, PresenceStore,
    RepoResult,
};
pub use value_objects::UserId;
