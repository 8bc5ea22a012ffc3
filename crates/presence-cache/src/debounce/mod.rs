//! Debounce token store backed by Redis

mod store;

pub use store::RedisDebounceStore;
