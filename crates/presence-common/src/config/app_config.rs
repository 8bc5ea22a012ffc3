//! Application configuration structs
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub presence: PresenceConfig,
    pub sweep: SweepConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Presence timing configuration.
///
/// `heartbeat_ttl_seconds` is the single liveness window shared across the
/// system: every online record expires exactly this long after its last
/// refresh. `online_ttl_seconds` governs the coarser dispatch-eligibility
/// debounce and is typically equal to or longer than the heartbeat window.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    #[serde(default = "default_heartbeat_ttl")]
    pub heartbeat_ttl_seconds: u64,
    #[serde(default = "default_online_ttl")]
    pub online_ttl_seconds: u64,
}

impl PresenceConfig {
    #[must_use]
    pub fn heartbeat_ttl(&self) -> Duration {
        Duration::from_secs(self.heartbeat_ttl_seconds)
    }

    #[must_use]
    pub fn online_ttl(&self) -> Duration {
        Duration::from_secs(self.online_ttl_seconds)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            heartbeat_ttl_seconds: default_heartbeat_ttl(),
            online_ttl_seconds: default_online_ttl(),
        }
    }
}

/// Reconciliation sweep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_sweep_interval")]
    pub interval_seconds: u64,
    #[serde(default = "default_stale_grace")]
    pub stale_grace_seconds: u64,
}

impl SweepConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    #[must_use]
    pub fn stale_grace(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.stale_grace_seconds as i64)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_sweep_interval(),
            stale_grace_seconds: default_stale_grace(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "presence-service".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_heartbeat_ttl() -> u64 {
    40 // heartbeat window, seconds
}

fn default_online_ttl() -> u64 {
    60 // dispatch debounce window, seconds
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_stale_grace() -> u64 {
    600 // 10 minutes
}

/// Read an optional environment variable.
///
/// Absent means the default; present but unparseable is a startup error,
/// never a silent fallback.
fn env_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(default),
    }
}

/// Read a required environment variable
fn env_required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env_or("APP_NAME", default_app_name())?,
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env_required("DATABASE_URL")?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
            },
            redis: RedisConfig {
                url: env_required("REDIS_URL")?,
                max_connections: env_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections())?,
            },
            presence: PresenceConfig {
                heartbeat_ttl_seconds: env_or(
                    "PRESENCE_HEARTBEAT_TTL_SECONDS",
                    default_heartbeat_ttl(),
                )?,
                online_ttl_seconds: env_or("PRESENCE_ONLINE_TTL_SECONDS", default_online_ttl())?,
            },
            sweep: SweepConfig {
                interval_seconds: env_or("SWEEP_INTERVAL_SECONDS", default_sweep_interval())?,
                stale_grace_seconds: env_or("SWEEP_STALE_GRACE_SECONDS", default_stale_grace())?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
