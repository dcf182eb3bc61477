//! Recency (LRU) Replacement Policy.
//!
//! Evicts the line whose `last_access_time` stamp is oldest. Because every hit and
//! install draws a fresh stamp from the access clock, the smallest stamp in a full
//! set identifies the least recently used line.
//!
//! # Performance
//!
//! - **Time Complexity:** `get_victim()` is O(W) where W is the associativity
//! - **Space Complexity:** none beyond the per-line stamp
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{ReplacementPolicy, first_invalid};
use crate::cache::line::CacheLine;

/// LRU policy over per-line access stamps.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecencyPolicy;

impl RecencyPolicy {
    /// Creates a new recency policy.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for RecencyPolicy {
    /// Returns the first invalid way, otherwise the way with the smallest stamp.
    ///
    /// Equal stamps resolve to the lowest way index.
    fn get_victim(&self, set: &[CacheLine], _core_id: u32) -> usize {
        if let Some(way) = first_invalid(set) {
            return way;
        }

        // min_by_key keeps the first of several equal minimums.
        set.iter()
            .enumerate()
            .min_by_key(|(_, line)| line.last_access_time)
            .map_or(0, |(way, _)| way)
    }
}
