//! Domain layer error type

use thiserror::Error;

use crate::value_objects::UserId;

/// Errors surfaced by the domain ports.
///
/// Every error in the presence subsystem is recoverable: callers log and
/// continue (or let the reconciliation sweep catch up) rather than aborting
/// the connection-handling path.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Driver not found: {0}")]
    DriverNotFound(UserId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Wrap a backing-store failure
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// Wrap a notification transport failure
    pub fn notification(err: impl std::fmt::Display) -> Self {
        Self::Notification(err.to_string())
    }
}
