//! Reconciliation sweep
//!
//! Periodic backstop against lost disconnect events (process crash, network
//! partition). Any driver still flagged online in durable storage whose
//! last activity predates the grace window is forced offline in one bulk
//! update. Idempotent: a sweep with nothing stale writes nothing.

use chrono::Utc;
use tracing::{error, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reconciliation sweeper
pub struct ReconciliationSweeper {
    ctx: ServiceContext,
}

impl ReconciliationSweeper {
    /// Create a new sweeper
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one sweep pass. Returns the number of drivers forced offline.
    #[instrument(skip(self))]
    pub async fn sweep_once(&self) -> ServiceResult<u64> {
        let cutoff = Utc::now() - self.ctx.sweep_config().stale_grace();
        let affected = self.ctx.driver_repo().expire_stale_online(cutoff).await?;

        if affected > 0 {
            info!(affected, %cutoff, "Reconciliation sweep forced stale drivers offline");
        }

        Ok(affected)
    }

    /// Drive the sweep on its configured interval, forever. Individual
    /// failures are logged and the loop continues.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.ctx.sweep_config().interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so startup does not
        // double-sweep alongside a nearly-due schedule.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = self.sweep_once().await {
                error!(error = %e, "Reconciliation sweep failed");
            }
        }
    }
}

impl std::fmt::Debug for ReconciliationSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconciliationSweeper")
            .field("config", self.ctx.sweep_config())
            .finish()
    }
}
