//! Cache install and construction tests.
//!
//! Verifies victim snapshots, dirty-eviction accounting, the dirty bit of fresh
//! lines, rejection of resident installs, and geometry validation.

use cachesim_core::ReplacementPolicy::{Frequency, Recency};
use cachesim_core::cache::line::{CacheLine, LineState};
use cachesim_core::{Cache, CacheConfig, CacheError, ReplacementPolicy};
use rstest::rstest;

use crate::common::{TestCache, single_set_config};

// ══════════════════════════════════════════════════════════
// 1. Fill order and fresh line state
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Recency)]
#[case(Frequency)]
fn fills_invalid_ways_in_order(#[case] policy: ReplacementPolicy) {
    let mut tc = TestCache::single_set(policy);

    tc.fill(&[10, 11, 12, 13]);

    let tags: Vec<u64> = tc.cache.set(0).unwrap().iter().map(|l| l.tag).collect();
    assert_eq!(tags, vec![10, 11, 12, 13]);
}

#[test]
fn install_state_follows_write_flag() {
    let mut tc = TestCache::single_set(Recency);

    assert!(tc.read(1).is_miss());
    assert!(tc.write(2).is_miss());

    let clean = tc.resident(1);
    let dirty = tc.resident(2);
    assert_eq!(clean.state(), LineState::Clean);
    assert_eq!(dirty.state(), LineState::Dirty);
    assert_eq!(clean.frequency, 1);
    assert_eq!(dirty.frequency, 1);
    assert!(dirty.last_access_time > clean.last_access_time);
}

/// A read fill over a dirty victim starts clean.
#[test]
fn read_install_over_dirty_victim_is_clean() {
    let mut tc = TestCache::with_sets(1, 1, Recency);

    assert!(tc.write(1).is_miss());
    assert!(tc.read(2).is_miss());
    assert_eq!(tc.resident(2).state(), LineState::Clean);
}

/// Frequency restarts at 1 when a slot is reused.
#[test]
fn frequency_resets_on_install() {
    let mut tc = TestCache::with_sets(1, 1, Frequency);

    tc.fill(&[1, 1, 1, 1]);
    assert_eq!(tc.resident(1).frequency, 4);

    tc.fill(&[2]);
    assert_eq!(tc.resident(2).frequency, 1);
    assert_eq!(tc.cache.last_evicted_line().frequency, 4);
}

// ══════════════════════════════════════════════════════════
// 2. Evicted line snapshot and dirty evictions
// ══════════════════════════════════════════════════════════

#[test]
fn last_evicted_starts_invalid() {
    let tc = TestCache::single_set(Recency);
    assert_eq!(*tc.cache.last_evicted_line(), CacheLine::default());
}

/// Filling an empty way snapshots the empty way.
#[test]
fn install_into_empty_way_snapshots_invalid_line() {
    let mut tc = TestCache::single_set(Recency);

    tc.fill(&[1]);
    assert!(!tc.cache.last_evicted_line().valid);
    assert_eq!(tc.cache.stats().dirty_evicts, 0);
}

#[test]
fn dirty_victim_is_snapshotted_and_counted() {
    let mut tc = TestCache::with_sets(1, 2, Recency);

    assert!(tc.write(1).is_miss());
    assert!(tc.read(2).is_miss());
    let victim_before = tc.resident(1);

    assert!(tc.read(3).is_miss());

    let evicted = *tc.cache.last_evicted_line();
    assert_eq!(evicted, victim_before);
    assert!(evicted.needs_writeback());
    assert_eq!(tc.cache.stats().dirty_evicts, 1);
}

#[test]
fn clean_victim_is_not_counted() {
    let mut tc = TestCache::with_sets(1, 2, Recency);

    tc.fill(&[1, 2, 3]);

    let evicted = tc.cache.last_evicted_line();
    assert_eq!(evicted.tag, 1);
    assert_eq!(evicted.state(), LineState::Clean);
    assert_eq!(tc.cache.stats().dirty_evicts, 0);
}

/// A write hit dirties the line; its later eviction is counted once.
#[test]
fn write_hit_then_eviction_counts_once() {
    let mut tc = TestCache::with_sets(1, 1, Recency);

    assert!(tc.read(1).is_miss());
    assert!(tc.write(1).is_hit());
    assert!(tc.read(2).is_miss());
    assert!(tc.read(3).is_miss());

    assert_eq!(tc.cache.stats().dirty_evicts, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Misuse
// ══════════════════════════════════════════════════════════

#[test]
fn install_of_resident_line_is_rejected() {
    let mut tc = TestCache::single_set(Recency);
    tc.fill(&[1, 2]);
    let before = tc.cache.set(0).unwrap().to_vec();
    let stamp_before = tc.cache.clock().now();

    let err = tc.cache.install(2, true, 0).unwrap_err();

    assert!(matches!(
        err,
        CacheError::AlreadyResident {
            line_addr: 2,
            set_index: 0
        }
    ));
    assert_eq!(tc.cache.set(0).unwrap(), before.as_slice());
    assert_eq!(tc.cache.clock().now(), stamp_before);
    assert_eq!(tc.cache.last_evicted_line().tag, 0);
}

// ══════════════════════════════════════════════════════════
// 4. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(32 * 1024, 8, 64, 64)]
#[case(256, 4, 64, 1)]
#[case(4096, 1, 64, 64)]
#[case(1024 * 1024, 16, 128, 512)]
fn geometry_derivation(
    #[case] size: u64,
    #[case] ways: u64,
    #[case] line: u64,
    #[case] sets: usize,
) {
    let cache = Cache::new(&CacheConfig::new(size, ways, line, Recency)).unwrap();
    assert_eq!(cache.num_sets(), sets);
    assert_eq!(cache.ways(), ways as usize);
    assert_eq!(cache.line_bytes(), line);
}

#[rstest]
#[case::zero_size(0, 4, 64)]
#[case::zero_ways(4096, 0, 64)]
#[case::zero_line(4096, 4, 0)]
#[case::line_does_not_divide_size(4096, 4, 48)]
#[case::ways_do_not_divide_lines(4096, 3, 64)]
#[case::three_sets(192, 1, 64)]
#[case::six_sets(768, 2, 64)]
fn invalid_geometry_is_rejected(#[case] size: u64, #[case] ways: u64, #[case] line: u64) {
    let err = Cache::new(&CacheConfig::new(size, ways, line, Frequency)).unwrap_err();
    assert!(err.is_configuration(), "unexpected error: {err}");
}

#[test]
fn non_power_of_two_sets_reports_count() {
    let err = Cache::new(&CacheConfig::new(768, 2, 64, Recency)).unwrap_err();
    assert!(matches!(err, CacheError::SetCountNotPowerOfTwo { num_sets: 6 }));
}

#[test]
fn install_never_changes_capacity() {
    let mut tc = TestCache::with_sets(2, 2, Frequency);

    for addr in 0..64 {
        let _ = tc.touch(addr % 9, addr % 3 == 0);
    }
    assert_eq!(tc.cache.num_sets(), 2);
    assert_eq!(tc.cache.ways(), 2);
    assert_eq!(tc.cache.set(0).unwrap().len(), 2);
    assert_eq!(tc.cache.set(1).unwrap().len(), 2);
}

#[test]
fn policy_is_fixed_at_construction() {
    let cache = Cache::new(&single_set_config(Frequency)).unwrap();
    assert_eq!(cache.policy(), Frequency);
}
