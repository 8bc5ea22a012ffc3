//! Presence services
//!
//! This module contains the service layer: event-driven session handling,
//! the online-queue debounce, the dispatch availability surface, and the
//! reconciliation sweeper.

pub mod availability;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod online_queue;
pub mod sweep;

// Re-export all services for convenience
pub use availability::AvailabilityService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::SessionLifecycle;
pub use online_queue::{ExpiryHandler, OnlineQueue};
pub use sweep::ReconciliationSweeper;
