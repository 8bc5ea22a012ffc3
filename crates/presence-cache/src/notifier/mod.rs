//! Availability notifications over Redis Pub/Sub

mod publisher;

pub use publisher::{availability_channel, RedisAvailabilityNotifier, BROADCAST_CHANNEL};
