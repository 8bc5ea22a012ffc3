//! Presence store backed by Redis

mod store;

pub use store::RedisPresenceStore;
