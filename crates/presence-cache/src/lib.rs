//! # presence-cache
//!
//! Redis layer for presence tracking.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Presence Store**: TTL'd liveness records with explicit expiry validation
//! - **Connection Registry**: per-user connection sets for multi-device support
//! - **Debounce Store**: shared dispatch-debounce tokens with atomic
//!   compare-and-delete claims
//! - **Notifier**: availability transitions over Redis Pub/Sub
//!
//! Every structure here is keyed per user so that multiple server processes
//! sharing one Redis can operate without application-level locks: `SADD`,
//! `SREM`, `SCARD`, and `SET ... EX` give the required atomicity.

pub mod debounce;
pub mod notifier;
pub mod pool;
pub mod presence;
pub mod registry;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export store implementations
pub use debounce::RedisDebounceStore;
pub use notifier::{availability_channel, RedisAvailabilityNotifier, BROADCAST_CHANNEL};
pub use presence::RedisPresenceStore;
pub use registry::RedisConnectionRegistry;
