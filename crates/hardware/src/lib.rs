//! Set-associative cache model for memory-hierarchy simulators.
//!
//! This crate implements a single cache level driven one reference at a time:
//! 1. **Cache:** Set/tag decomposition, hit detection, and dirty/recency/frequency bookkeeping.
//! 2. **Policies:** Recency (LRU) and frequency (LFU) victim selection.
//! 3. **Clock:** A shared logical clock ordering accesses across cache instances.
//! 4. **Statistics:** Access, miss, and dirty-eviction counters with a fixed text report.
//! 5. **Simulation:** Trace parsing and a replay driver that tracks writebacks.

/// Set-associative cache, line storage, clock, and replacement policies.
pub mod cache;
/// Common types (access kinds, errors).
pub mod common;
/// Cache configuration (geometry, replacement policy selector).
pub mod config;
/// Trace parsing and replay driver.
pub mod sim;
/// Cache statistics collection and reporting.
pub mod stats;

/// Main cache type; construct with `Cache::new` or `Cache::with_clock`.
pub use crate::cache::{AccessOutcome, Cache};
/// Error type and result alias shared by the crate.
pub use crate::common::{CacheError, Result};
/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, ReplacementPolicy};
/// Cache statistics counters.
pub use crate::stats::CacheStats;
