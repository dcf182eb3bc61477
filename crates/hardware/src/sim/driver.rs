//! Trace-driven cache driver.
//!
//! The driver owns one [`Cache`] and replays byte-address references against it:
//! every reference is looked up, every miss is installed, and every install that
//! displaces a dirty line produces a writeback of that line.

use tracing::debug;

use super::trace::TraceRecord;
use crate::cache::{AccessOutcome, Cache};
use crate::common::Result;
use crate::stats::CacheStats;

/// What one replayed reference did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Hit or miss of the lookup.
    pub outcome: AccessOutcome,
    /// Line address written back because a dirty line was evicted by the fill.
    pub writeback: Option<u64>,
}

/// Replays references through a single cache.
#[derive(Debug)]
pub struct TraceDriver {
    cache: Cache,
    writebacks: u64,
}

impl TraceDriver {
    /// Wraps a constructed cache.
    pub const fn new(cache: Cache) -> Self {
        Self {
            cache,
            writebacks: 0,
        }
    }

    /// Converts a byte address to the line address the cache is indexed by.
    #[inline]
    pub const fn line_addr(&self, addr: u64) -> u64 {
        addr / self.cache.line_bytes()
    }

    /// Replays one reference: lookup, then install on a miss.
    ///
    /// # Errors
    ///
    /// Propagates install errors. A miss is never resident, so in practice this
    /// does not fail.
    pub fn step(&mut self, record: &TraceRecord) -> Result<StepOutcome> {
        let line_addr = self.line_addr(record.addr);
        let is_write = record.is_write();

        let outcome = self.cache.access(line_addr, is_write, record.core_id);
        if outcome.is_hit() {
            return Ok(StepOutcome {
                outcome,
                writeback: None,
            });
        }

        self.cache.install(line_addr, is_write, record.core_id)?;

        let victim = self.cache.last_evicted_line();
        let writeback = victim.needs_writeback().then_some(victim.tag);
        if let Some(victim_addr) = writeback {
            self.writebacks += 1;
            debug!(victim_addr, core_id = record.core_id, "writeback");
        }

        Ok(StepOutcome { outcome, writeback })
    }

    /// Replays a sequence of references and returns how many were replayed.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run<'a, I>(&mut self, records: I) -> Result<u64>
    where
        I: IntoIterator<Item = &'a TraceRecord>,
    {
        let mut replayed = 0;
        for record in records {
            let _ = self.step(record)?;
            replayed += 1;
        }
        debug!(replayed, writebacks = self.writebacks, "trace replay finished");
        Ok(replayed)
    }

    /// Number of writebacks produced so far.
    pub const fn writebacks(&self) -> u64 {
        self.writebacks
    }

    /// Statistics of the driven cache.
    pub const fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// The driven cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Consumes the driver and returns the cache.
    pub fn into_cache(self) -> Cache {
        self.cache
    }
}
