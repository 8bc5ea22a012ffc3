//! # presence-db
//!
//! Database layer implementing the `DriverRepository` port with PostgreSQL
//! via SQLx. It handles:
//!
//! - Connection pool management
//! - The `DriverModel` with SQLx `FromRow` derive and its entity mapper
//! - The bulk reconciliation update used by the periodic sweep

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::PgDriverRepository;
