//! Repository implementations

mod driver;
mod error;

pub use driver::PgDriverRepository;
