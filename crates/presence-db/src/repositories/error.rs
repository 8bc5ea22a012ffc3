//! Error handling utilities for repositories

use presence_core::{DomainError, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Create a "driver not found" error
pub fn driver_not_found(id: UserId) -> DomainError {
    DomainError::DriverNotFound(id)
}
