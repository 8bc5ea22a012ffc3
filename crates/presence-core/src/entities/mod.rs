//! Domain entities - core business objects

mod driver;
mod presence;

pub use driver::{Driver, Role};
pub use presence::{PresenceRecord, PresenceState};
