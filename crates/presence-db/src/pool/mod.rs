//! PostgreSQL connection pool

mod postgres;

pub use postgres::{create_pool, DatabaseConfig};
pub use sqlx::PgPool;
