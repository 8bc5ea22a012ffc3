//! # presence-service
//!
//! Application layer for driver presence: session lifecycle entry points,
//! the online-queue debounce, the availability surface queried by dispatch,
//! and the reconciliation sweeper that backstops lost disconnect events.

pub mod services;

pub use services::{
    AvailabilityService, OnlineQueue, ReconciliationSweeper, ServiceContext, ServiceError,
    ServiceResult, SessionLifecycle,
};

use presence_common::{AppConfig, AppError};
use std::sync::Arc;

/// Initialize all dependencies from configuration and build the service context
pub async fn create_service_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    // Create database pool
    tracing::info!("Connecting to PostgreSQL...");
    let db_config = presence_db::DatabaseConfig::from(&config.database);
    let pool = presence_db::create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established");

    // Create Redis pool
    tracing::info!("Connecting to Redis...");
    let redis_config = presence_cache::RedisPoolConfig::from(&config.redis);
    let redis_pool =
        presence_cache::RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    redis_pool
        .health_check()
        .await
        .map_err(|e| AppError::Cache(e.to_string()))?;
    tracing::info!("Redis connection established");

    let heartbeat_ttl = config.presence.heartbeat_ttl_seconds;
    let driver_repo = Arc::new(presence_db::PgDriverRepository::new(pool));
    let presence_store = Arc::new(presence_cache::RedisPresenceStore::new(
        redis_pool.clone(),
        heartbeat_ttl,
    ));
    let registry = Arc::new(presence_cache::RedisConnectionRegistry::new(
        redis_pool.clone(),
        heartbeat_ttl,
    ));
    let notifier = Arc::new(presence_cache::RedisAvailabilityNotifier::new(
        redis_pool.clone(),
    ));
    let debounce_store = Arc::new(presence_cache::RedisDebounceStore::new(redis_pool));

    Ok(ServiceContext::new(
        driver_repo,
        presence_store,
        registry,
        notifier,
        debounce_store,
        config.presence.clone(),
        config.sweep.clone(),
    ))
}

/// Run the presence daemon: wire dependencies and drive the reconciliation
/// sweep until shutdown.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let ctx = create_service_context(&config).await?;

    let sweeper = ReconciliationSweeper::new(ctx);
    tracing::info!(
        interval_seconds = config.sweep.interval_seconds,
        grace_seconds = config.sweep.stale_grace_seconds,
        "Reconciliation sweeper starting"
    );

    tokio::select! {
        () = sweeper.run() => Ok(()),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
            Ok(())
        }
    }
}
