//! Value objects - identifier types shared across the domain

mod user_id;

pub use user_id::UserId;
