//! Trace replay.
//!
//! This module provides the reference driver around the cache model:
//! 1. **Trace:** Parsing of textual memory reference traces.
//! 2. **Driver:** Replay of parsed references with miss fills and writeback tracking.

/// Trace-driven cache driver.
pub mod driver;

/// Memory reference trace parsing.
pub mod trace;

pub use driver::{StepOutcome, TraceDriver};
pub use trace::{TraceRecord, load_trace, parse_trace};
