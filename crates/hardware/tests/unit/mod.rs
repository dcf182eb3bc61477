//! # Unit Components
//!
//! Organizes the unit tests by crate module.

/// Unit tests for the cache: lookup, install, policies, clock, and invariants.
pub mod cache;
