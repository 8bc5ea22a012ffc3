//! Database models

mod driver;

pub use driver::DriverModel;
