//! Integration test utilities for the presence service
//!
//! This crate provides in-memory implementations of the storage ports plus
//! a wired-up service harness, so the presence properties can be exercised
//! end to end without a live Redis or PostgreSQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
