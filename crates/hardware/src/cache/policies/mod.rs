//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in set-associative caches.
//! Policies are stateless: all the information they need (validity, recency
//! stamps, hit counts) lives in the lines themselves.
//!
//! # Policies
//!
//! - `Recency`: evict the least recently used line.
//! - `Frequency`: evict the least frequently used line, breaking ties toward
//!   the most recently used one.

/// Frequency (LFU) replacement policy.
pub mod frequency;

/// Recency (LRU) replacement policy.
pub mod recency;

pub use frequency::FrequencyPolicy;
pub use recency::RecencyPolicy;

use super::line::CacheLine;

/// Trait for cache replacement policies.
///
/// Implementations are pure functions of one set's lines.
pub trait ReplacementPolicy: std::fmt::Debug + Send + Sync {
    /// Selects a victim way within a set.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of one set, indexed by way. Never empty.
    /// * `core_id` - The core that triggered the fill. Current policies ignore it.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&self, set: &[CacheLine], core_id: u32) -> usize;
}

/// Returns the first invalid way in scan order.
///
/// Every policy fills empty slots before evicting live data.
#[inline]
pub fn first_invalid(set: &[CacheLine]) -> Option<usize> {
    set.iter().position(|line| !line.valid)
}
