//! Entity <-> model mappers

mod driver;
