//! Set-Associative Cache Model.
//!
//! This module implements a set-associative cache driven one reference at a time.
//! Lookup and fill are separate operations: [`Cache::access`] only reports a hit or
//! a miss, and the driver calls [`Cache::install`] after a miss to bring the line in.
//! The line displaced by an install is kept in [`Cache::last_evicted_line`] so the
//! driver can generate writebacks for dirty victims.
//!
//! Addresses are line addresses (byte address divided by the line size). The set
//! index is the low bits of the line address, and the whole line address is stored
//! as the tag.

/// Shared logical access clock.
pub mod clock;

/// Cache line storage slot.
pub mod line;

/// Cache replacement policy implementations (Recency, Frequency).
pub mod policies;

use std::ops::Range;

use tracing::{debug, trace};

use self::clock::AccessClock;
use self::line::CacheLine;
use self::policies::{FrequencyPolicy, RecencyPolicy, ReplacementPolicy};
use crate::common::{AccessType, CacheError, Result};
use crate::config::{CacheConfig, Geometry, ReplacementPolicy as PolicyType};
use crate::stats::CacheStats;

/// Result of a cache lookup.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The line was resident.
    Hit,
    /// The line was not resident; nothing was installed.
    Miss,
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` for [`AccessOutcome::Miss`].
    #[inline]
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Set-associative cache with recency or frequency replacement.
///
/// All lines live in one flat arena indexed by `set * ways + way`. The geometry is
/// fixed at construction.
#[derive(Debug)]
pub struct Cache {
    lines: Vec<CacheLine>,
    geometry: Geometry,
    policy_type: PolicyType,
    policy: Box<dyn ReplacementPolicy>,
    clock: AccessClock,
    stats: CacheStats,
    last_evicted: CacheLine,
}

impl Cache {
    /// Creates a cache that stamps lines from the process-wide clock.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration specifying size, associativity,
    ///   line size, and replacement policy
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the geometry is invalid (see
    /// [`CacheConfig::geometry`]).
    pub fn new(config: &CacheConfig) -> Result<Self> {
        Self::with_clock(config, AccessClock::global())
    }

    /// Creates a cache that stamps lines from `clock`.
    ///
    /// Caches built from clones of the same clock share one recency order.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the geometry is invalid (see
    /// [`CacheConfig::geometry`]).
    pub fn with_clock(config: &CacheConfig, clock: AccessClock) -> Result<Self> {
        let geometry = config.geometry()?;

        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyType::Recency => Box::new(RecencyPolicy::new()),
            PolicyType::Frequency => Box::new(FrequencyPolicy::new()),
        };

        debug!(
            size_bytes = config.size_bytes,
            line_bytes = geometry.line_bytes,
            num_sets = geometry.num_sets,
            ways = geometry.ways,
            policy = config.policy.name(),
            "cache constructed"
        );

        Ok(Self {
            lines: vec![CacheLine::default(); geometry.total_lines()],
            geometry,
            policy_type: config.policy,
            policy,
            clock,
            stats: CacheStats::default(),
            last_evicted: CacheLine::default(),
        })
    }

    /// Looks up a line and updates the statistics.
    ///
    /// On a hit the resident line gets a fresh clock stamp, its frequency is
    /// incremented, and a write marks it dirty. A miss changes nothing but the
    /// miss counter.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - The line address to look up
    /// * `is_write` - Whether this is a write operation
    /// * `core_id` - The originating core, carried for attribution only
    pub fn access(&mut self, line_addr: u64, is_write: bool, core_id: u32) -> AccessOutcome {
        let kind = AccessType::from_write(is_write);
        let (set_index, tag) = self.decompose(line_addr);
        self.stats.record_access(kind);

        let range = self.set_range(set_index);
        let hit_way = self.lines[range.clone()]
            .iter()
            .position(|line| line.matches(tag));

        if let Some(way) = hit_way {
            let stamp = self.clock.next_timestamp();
            let line = &mut self.lines[range.start + way];
            line.last_access_time = stamp;
            line.frequency += 1;
            if is_write {
                line.dirty = true;
            }
            trace!(line_addr, set_index, way, core_id, is_write, "hit");
            return AccessOutcome::Hit;
        }

        self.stats.record_miss(kind);
        trace!(line_addr, set_index, core_id, is_write, "miss");
        AccessOutcome::Miss
    }

    /// Installs a line after a miss.
    ///
    /// Selects a victim with the replacement policy, snapshots it into
    /// [`Self::last_evicted_line`], counts it if dirty, and overwrites it with the
    /// new line. The new line is dirty only when installed by a write.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - The line address to install
    /// * `is_write` - Whether the miss was a write
    /// * `core_id` - The originating core, passed to the replacement policy
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::AlreadyResident`] if the line is already present in
    /// its set. The cache is left untouched in that case.
    pub fn install(&mut self, line_addr: u64, is_write: bool, core_id: u32) -> Result<()> {
        let (set_index, tag) = self.decompose(line_addr);
        let range = self.set_range(set_index);

        if self.lines[range.clone()].iter().any(|line| line.matches(tag)) {
            debug!(line_addr, set_index, core_id, "install of resident line rejected");
            return Err(CacheError::AlreadyResident {
                line_addr,
                set_index,
            });
        }

        let way = self.policy.get_victim(&self.lines[range.clone()], core_id);
        let idx = range.start + way;

        self.last_evicted = self.lines[idx];
        if self.last_evicted.dirty {
            self.stats.record_dirty_evict();
            debug!(
                victim = self.last_evicted.tag,
                set_index, way, "dirty eviction"
            );
        }

        self.lines[idx] = CacheLine {
            valid: true,
            tag,
            dirty: is_write,
            last_access_time: self.clock.next_timestamp(),
            frequency: 1,
        };

        trace!(
            line_addr,
            set_index,
            way,
            core_id,
            is_write,
            victim_valid = self.last_evicted.valid,
            "install"
        );
        Ok(())
    }

    /// Returns the way the replacement policy would evict from `set_index`.
    ///
    /// Returns `None` if `set_index` is out of range.
    pub fn find_victim(&self, set_index: usize, core_id: u32) -> Option<usize> {
        self.set(set_index)
            .map(|set| self.policy.get_victim(set, core_id))
    }

    /// Returns `true` if `line_addr` is resident. Has no side effects.
    pub fn contains(&self, line_addr: u64) -> bool {
        let (set_index, tag) = self.decompose(line_addr);
        self.lines[self.set_range(set_index)]
            .iter()
            .any(|line| line.matches(tag))
    }

    /// Returns the resident line for `line_addr`, if any. Has no side effects.
    pub fn probe(&self, line_addr: u64) -> Option<&CacheLine> {
        let (set_index, tag) = self.decompose(line_addr);
        self.lines[self.set_range(set_index)]
            .iter()
            .find(|line| line.matches(tag))
    }

    /// Snapshot of the line displaced by the most recent install.
    ///
    /// Invalid until the first install; after that a valid, dirty snapshot means
    /// the driver owes a writeback of `tag`.
    pub const fn last_evicted_line(&self) -> &CacheLine {
        &self.last_evicted
    }

    /// Returns the lines of one set, indexed by way.
    pub fn set(&self, set_index: usize) -> Option<&[CacheLine]> {
        (set_index < self.geometry.num_sets).then(|| &self.lines[self.set_range(set_index)])
    }

    /// Returns the set a line address maps to.
    #[inline]
    pub const fn set_index(&self, line_addr: u64) -> usize {
        (line_addr & self.geometry.set_mask()) as usize
    }

    /// Running statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.geometry.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.geometry.ways
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> u64 {
        self.geometry.line_bytes
    }

    /// Validated geometry.
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Replacement policy selected at construction.
    pub const fn policy(&self) -> PolicyType {
        self.policy_type
    }

    /// Clock used to stamp lines.
    pub const fn clock(&self) -> &AccessClock {
        &self.clock
    }

    /// Splits a line address into set index and tag. The tag is the full address.
    #[inline]
    const fn decompose(&self, line_addr: u64) -> (usize, u64) {
        (self.set_index(line_addr), line_addr)
    }

    #[inline]
    const fn set_range(&self, set_index: usize) -> Range<usize> {
        let base = set_index * self.geometry.ways;
        base..base + self.geometry.ways
    }
}
