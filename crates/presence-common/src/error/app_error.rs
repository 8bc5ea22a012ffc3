//! Application error types
//!
//! Unified error handling for the daemon. Everything in the presence
//! subsystem is recoverable: errors are logged and the event-driven paths or
//! the reconciliation sweep catch up, so none of these variants should ever
//! take the host process down.

use presence_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create an internal error from anything convertible to anyhow
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from a backing store being unavailable.
    /// Presence writes fail closed on these: the caller treats the user as
    /// "cannot confirm online" and lets the sweep recover.
    #[must_use]
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Cache(_))
    }
}

/// Result alias using AppError
pub type AppResult<T> = Result<T, AppError>;
