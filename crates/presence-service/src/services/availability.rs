//! Availability service
//!
//! The business-level "driver is available for dispatch" surface. Layered
//! above socket presence: a driver may keep the dispatch flag through a
//! brief reconnect gap (online-queue debounce) even with zero live sockets.

use async_trait::async_trait;
use presence_core::{AvailabilityChange, UserId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::online_queue::{ExpiryHandler, OnlineQueue};

/// Availability service
pub struct AvailabilityService {
    ctx: ServiceContext,
    queue: Arc<OnlineQueue>,
}

impl AvailabilityService {
    /// Create a new AvailabilityService, wiring the online queue's expiry
    /// to the durable offline transition.
    pub fn new(ctx: ServiceContext) -> Arc<Self> {
        let effect = Arc::new(OfflineEffect { ctx: ctx.clone() });
        let queue = Arc::new(OnlineQueue::new(
            ctx.presence_config().online_ttl(),
            ctx.debounce_store().clone(),
            effect,
        ));
        Arc::new(Self { ctx, queue })
    }

    /// The debounce queue (shared with the session lifecycle)
    pub fn queue(&self) -> &OnlineQueue {
        &self.queue
    }

    /// Is this user reachable right now? Queried by dispatch to filter
    /// eligible drivers.
    ///
    /// Fails closed: when the store cannot confirm liveness the user is
    /// reported offline and the error is logged.
    #[instrument(skip(self))]
    pub async fn is_online(&self, user_id: UserId) -> bool {
        match self.ctx.presence_store().is_online(user_id).await {
            Ok(online) => online,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Presence read failed; reporting offline");
                false
            }
        }
    }

    /// Driver signaled activity: refresh the debounce window, persist the
    /// dispatch flag, and announce the ONLINE transition.
    #[instrument(skip(self))]
    pub async fn mark_active(&self, driver_id: UserId) -> ServiceResult<()> {
        let driver = self
            .ctx
            .driver_repo()
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Driver", driver_id.to_string()))?;

        // Riders and admins have presence but no dispatch flag
        if !driver.role.is_driver() {
            tracing::debug!(user_id = %driver_id, role = %driver.role, "Not a driver account");
            return Ok(());
        }

        self.queue.add(driver_id).await;
        self.ctx.driver_repo().set_online(driver_id, true).await?;

        info!(driver_id = %driver_id, "Driver marked active");

        let change = AvailabilityChange::online(driver_id);
        if let Err(e) = self.ctx.notifier().notify(&change).await {
            warn!(driver_id = %driver_id, error = %e, "Failed to publish ONLINE transition");
        }

        Ok(())
    }

    /// Driver explicitly went off shift: cancel the debounce window,
    /// persist the flag, and announce the OFFLINE transition.
    #[instrument(skip(self))]
    pub async fn mark_inactive(&self, driver_id: UserId) -> ServiceResult<()> {
        self.queue.remove(driver_id).await;
        self.ctx.driver_repo().set_online(driver_id, false).await?;

        info!(driver_id = %driver_id, "Driver marked inactive");

        let change = AvailabilityChange::offline(driver_id);
        if let Err(e) = self.ctx.notifier().notify(&change).await {
            warn!(driver_id = %driver_id, error = %e, "Failed to publish OFFLINE transition");
        }

        Ok(())
    }
}

impl std::fmt::Debug for AvailabilityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityService")
            .field("queue", &self.queue)
            .finish()
    }
}

/// Durable offline transition fired when a debounce window lapses
struct OfflineEffect {
    ctx: ServiceContext,
}

#[async_trait]
impl ExpiryHandler for OfflineEffect {
    async fn on_expire(&self, user_id: UserId) {
        // Heartbeats arm the window for every account, but only driver
        // rows carry a dispatch flag to lower or a transition to publish.
        match self.ctx.driver_repo().find_by_id(user_id).await {
            Ok(Some(driver)) if driver.role.is_driver() => {}
            Ok(_) => {
                tracing::debug!(user_id = %user_id, "Expiry for non-driver account");
                return;
            }
            Err(e) => {
                // The sweep remains the backstop when the read fails
                warn!(user_id = %user_id, error = %e, "Failed to load account on expiry");
                return;
            }
        }

        // The queue guarantees at-most-once per token; everything here is
        // logged, never retried synchronously.
        match self.ctx.driver_repo().set_online(user_id, false).await {
            Ok(()) => {
                info!(user_id = %user_id, "Driver expired to offline");
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to persist offline transition");
            }
        }

        let change = AvailabilityChange::offline(user_id);
        if let Err(e) = self.ctx.notifier().notify(&change).await {
            warn!(user_id = %user_id, error = %e, "Failed to publish OFFLINE transition");
        }
    }
}
