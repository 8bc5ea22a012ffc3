//! Connection registry backed by Redis sets

mod connection_registry;

pub use connection_registry::RedisConnectionRegistry;
