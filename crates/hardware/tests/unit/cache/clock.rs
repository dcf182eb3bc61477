//! Access clock tests.

use cachesim_core::cache::clock::{AccessClock, FIRST_STAMP};
use cachesim_core::{Cache, ReplacementPolicy};

use crate::common::single_set_config;

#[test]
fn fresh_clock_starts_at_first_stamp() {
    let clock = AccessClock::new();
    assert_eq!(clock.now(), FIRST_STAMP);
    assert_eq!(clock.next_timestamp(), 1);
    assert_eq!(clock.next_timestamp(), 2);
    assert_eq!(clock.now(), 3);
}

#[test]
fn clones_share_one_counter() {
    let a = AccessClock::new();
    let b = a.clone();

    assert_eq!(a.next_timestamp(), 1);
    assert_eq!(b.next_timestamp(), 2);
    assert_eq!(a.next_timestamp(), 3);
    assert!(a.is_shared_with(&b));
    assert!(!a.is_shared_with(&AccessClock::new()));
}

#[test]
fn global_clock_is_shared() {
    assert!(AccessClock::global().is_shared_with(&AccessClock::global()));

    let cache = Cache::new(&single_set_config(ReplacementPolicy::Recency)).unwrap();
    assert!(cache.clock().is_shared_with(&AccessClock::global()));
}

/// Two caches on one clock interleave stamps in call order.
#[test]
fn caches_sharing_a_clock_are_totally_ordered() {
    let clock = AccessClock::new();
    let config = single_set_config(ReplacementPolicy::Recency);
    let mut icache = Cache::with_clock(&config, clock.clone()).unwrap();
    let mut dcache = Cache::with_clock(&config, clock.clone()).unwrap();

    icache.install(1, false, 0).unwrap();
    dcache.install(1, false, 1).unwrap();
    icache.install(2, false, 0).unwrap();

    assert_eq!(icache.probe(1).unwrap().last_access_time, 1);
    assert_eq!(dcache.probe(1).unwrap().last_access_time, 2);
    assert_eq!(icache.probe(2).unwrap().last_access_time, 3);
    assert_eq!(clock.now(), 4);
}

/// Misses do not consume stamps.
#[test]
fn misses_do_not_advance_clock() {
    let clock = AccessClock::new();
    let mut cache =
        Cache::with_clock(&single_set_config(ReplacementPolicy::Frequency), clock.clone()).unwrap();

    for addr in 0..10 {
        assert!(cache.access(addr, addr % 2 == 0, 0).is_miss());
    }
    assert_eq!(clock.now(), FIRST_STAMP);
}
