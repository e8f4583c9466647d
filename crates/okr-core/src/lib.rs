//! Core types and the progress engine for the OKR tracker.
//!
//! The goal tree ([`model`]) is rolled up by a set of pure functions:
//! [`progress`] computes percentages, [`status`] bands them, [`deadline`]
//! places target dates relative to a caller-supplied "now", and [`summary`]
//! combines all three into dashboard statistics in a single pass.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod deadline;
pub mod draft;
pub mod error;
pub mod model;
pub mod progress;
pub mod status;
pub mod store;
pub mod summary;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
