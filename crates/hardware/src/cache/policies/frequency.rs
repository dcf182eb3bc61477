//! Frequency (LFU) Replacement Policy.
//!
//! Evicts the line with the fewest hits since install. Lines tied on the lowest
//! frequency are split by recency, but in the opposite direction from LRU: the
//! candidate touched most recently is evicted. A freshly installed line therefore
//! goes before an equally cold line that has been sitting in the set longer.
//!
//! # Performance
//!
//! - **Time Complexity:** `get_victim()` is O(W), two passes over the set
//! - **Space Complexity:** none beyond the per-line counters
//! - **Worst Case:** Phase changes, where formerly hot lines keep high counts

use super::{ReplacementPolicy, first_invalid};
use crate::cache::line::CacheLine;

/// LFU policy with most-recent tie-break.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrequencyPolicy;

impl FrequencyPolicy {
    /// Creates a new frequency policy.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for FrequencyPolicy {
    /// Returns the first invalid way, otherwise the least frequently used way.
    ///
    /// Among ways sharing the minimum frequency the one with the largest stamp
    /// wins; equal stamps resolve to the lowest way index.
    fn get_victim(&self, set: &[CacheLine], _core_id: u32) -> usize {
        if let Some(way) = first_invalid(set) {
            return way;
        }

        let Some(min_frequency) = set.iter().map(|line| line.frequency).min() else {
            return 0;
        };

        let mut victim: Option<(usize, u64)> = None;
        for (way, line) in set.iter().enumerate() {
            if line.frequency != min_frequency {
                continue;
            }
            match victim {
                Some((_, newest)) if line.last_access_time <= newest => {}
                _ => victim = Some((way, line.last_access_time)),
            }
        }

        victim.map_or(0, |(way, _)| way)
    }
}
