//! PostgreSQL implementation of DriverRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use presence_core::{Driver, DriverRepository, RepoResult, UserId};

use crate::models::DriverModel;

use super::error::{driver_not_found, map_db_error};

/// PostgreSQL implementation of DriverRepository
#[derive(Clone)]
pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    /// Create a new PgDriverRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<Driver>> {
        let result = sqlx::query_as::<_, DriverModel>(
            r"
            SELECT id, name, phone, role, vehicle, is_online,
                   last_active_at, created_at, updated_at
            FROM drivers
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Driver::from))
    }

    #[instrument(skip(self))]
    async fn set_online(&self, id: UserId, online: bool) -> RepoResult<()> {
        // Going online is activity; going offline must not rewrite
        // last_active_at or the sweep's staleness check loses its anchor.
        let result = if online {
            sqlx::query(
                r"
                UPDATE drivers
                SET is_online = TRUE, last_active_at = NOW(), updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
        } else {
            sqlx::query(
                r"
                UPDATE drivers
                SET is_online = FALSE, updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
        }
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(driver_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch_last_active(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE drivers
            SET last_active_at = NOW(), updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(driver_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn expire_stale_online(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        // Single bulk update: idempotent, and a no-op when nothing is stale
        let result = sqlx::query(
            r"
            UPDATE drivers
            SET is_online = FALSE, updated_at = NOW()
            WHERE is_online = TRUE AND last_active_at < $1
            ",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
