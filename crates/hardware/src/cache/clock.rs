//! Shared logical access clock.
//!
//! Every hit and every install stamps the touched line with the next value of an
//! [`AccessClock`]. Caches that clone the same clock handle observe one total order
//! of stamps, which is what makes recency comparable across cache instances
//! (e.g. one cache per simulated core).
//!
//! The counter is atomic so the ordering survives being driven from several
//! threads; the cache itself is still single-threaded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

/// Value handed out by the first call to [`AccessClock::next_timestamp`].
///
/// Zero is reserved for never-touched lines.
pub const FIRST_STAMP: u64 = 1;

/// Process-wide clock used by [`crate::Cache::new`].
static GLOBAL_CLOCK: LazyLock<AccessClock> = LazyLock::new(AccessClock::new);

/// Monotonic stamp source shared by cloning.
#[derive(Clone, Debug)]
pub struct AccessClock {
    counter: Arc<AtomicU64>,
}

impl AccessClock {
    /// Creates an independent clock starting at [`FIRST_STAMP`].
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(FIRST_STAMP)),
        }
    }

    /// Returns a handle to the process-wide clock.
    pub fn global() -> Self {
        GLOBAL_CLOCK.clone()
    }

    /// Returns the current stamp and advances the clock.
    #[inline]
    pub fn next_timestamp(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the stamp the next call to [`Self::next_timestamp`] will hand out.
    pub fn now(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Returns `true` if both handles advance the same counter.
    pub fn is_shared_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.counter, &other.counter)
    }
}

impl Default for AccessClock {
    fn default() -> Self {
        Self::new()
    }
}
