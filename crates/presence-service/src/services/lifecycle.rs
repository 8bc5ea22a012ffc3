//! Session lifecycle service
//!
//! Entry points for the three events the realtime transport delivers:
//! connect, heartbeat, disconnect. The transport has already authenticated
//! the user; no re-authentication happens here.
//!
//! None of these paths may crash the connection handler: every store
//! failure is logged and dropped, and the reconciliation sweep recovers
//! whatever the event-driven paths miss. Per-user store atomicity keeps
//! concurrent events for the same user safe across processes; events for
//! different users never contend.

use presence_core::UserId;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::availability::AvailabilityService;
use super::context::ServiceContext;

/// Session lifecycle service
pub struct SessionLifecycle {
    ctx: ServiceContext,
    availability: Arc<AvailabilityService>,
}

impl SessionLifecycle {
    /// Create a new SessionLifecycle
    pub fn new(ctx: ServiceContext, availability: Arc<AvailabilityService>) -> Self {
        Self { ctx, availability }
    }

    /// A client opened a realtime connection.
    ///
    /// Registers the connection, marks presence online (overwrite/refresh
    /// semantics make a duplicate connect harmless), and refreshes the
    /// dispatch debounce. The ONLINE transition is announced only when this
    /// was the user's first live connection.
    #[instrument(skip(self))]
    pub async fn on_connect(&self, user_id: UserId, connection_id: &str) {
        let count = match self
            .ctx
            .registry()
            .add_connection(user_id, connection_id)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to register connection");
                return;
            }
        };

        if let Err(e) = self.ctx.presence_store().mark_online(user_id).await {
            warn!(user_id = %user_id, error = %e, "Failed to mark presence online");
        }

        if count == 1 {
            if let Err(e) = self.availability.mark_active(user_id).await {
                warn!(user_id = %user_id, error = %e, "Failed to mark driver active");
            }
        } else {
            // Additional device: keep the debounce warm, no transition
            self.availability.queue().add(user_id).await;
        }

        debug!(user_id = %user_id, connection_id = %connection_id, live = count, "Connected");
    }

    /// A heartbeat arrived on an established connection.
    ///
    /// Extends the presence TTL and the dispatch debounce and refreshes the
    /// durable activity timestamp the sweep anchors on. The registry is not
    /// touched.
    #[instrument(skip(self))]
    pub async fn on_heartbeat(&self, user_id: UserId) {
        if let Err(e) = self.ctx.presence_store().refresh(user_id).await {
            warn!(user_id = %user_id, error = %e, "Failed to refresh presence");
        }

        self.availability.queue().add(user_id).await;

        if let Err(e) = self.ctx.driver_repo().touch_last_active(user_id).await {
            debug!(user_id = %user_id, error = %e, "Failed to touch last_active_at");
        }
    }

    /// A connection closed (clean close or observed error).
    ///
    /// Removes the connection; removing an id that was never registered is
    /// a no-op (duplicate disconnect events are expected). When the last
    /// connection goes, socket presence drops immediately while the
    /// dispatch flag decays through the online-queue debounce.
    #[instrument(skip(self))]
    pub async fn on_disconnect(&self, user_id: UserId, connection_id: &str) {
        let count = match self
            .ctx
            .registry()
            .remove_connection(user_id, connection_id)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to deregister connection");
                return;
            }
        };

        if count == 0 {
            if let Err(e) = self.ctx.presence_store().mark_offline(user_id).await {
                warn!(user_id = %user_id, error = %e, "Failed to mark presence offline");
            }
        }

        debug!(user_id = %user_id, connection_id = %connection_id, live = count, "Disconnected");
    }
}

impl std::fmt::Debug for SessionLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLifecycle").finish()
    }
}
