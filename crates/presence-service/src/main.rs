//! Presence daemon entry point
//!
//! Run with:
//! ```bash
//! cargo run -p presence-service
//! ```
//!
//! Configuration is loaded from environment variables.

use presence_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        heartbeat_ttl = config.presence.heartbeat_ttl_seconds,
        online_ttl = config.presence.online_ttl_seconds,
        "Starting presence daemon"
    );

    if let Err(e) = presence_service::run(config).await {
        error!(error = %e, "Presence daemon failed");
        std::process::exit(1);
    }
}
