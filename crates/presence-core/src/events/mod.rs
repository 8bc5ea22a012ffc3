//! Domain events

mod availability_change;

pub use availability_change::{Availability, AvailabilityChange};
