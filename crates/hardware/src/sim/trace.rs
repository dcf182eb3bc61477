//! Memory reference trace parsing.
//!
//! A trace is plain text with one reference per line:
//!
//! ```text
//! # op  address      [core]
//! R     0x7ffe1000
//! W     7ffe1040     1
//! ```
//!
//! `op` is `R`/`L` for reads and `W`/`S` for writes (either case). The address is a
//! byte address in hexadecimal, with or without a `0x` prefix. The core id is an
//! optional decimal number and defaults to 0. Blank lines and lines starting with
//! `#` are skipped.

use std::path::Path;
use std::str::FromStr;

use crate::common::{AccessType, CacheError, Result};

/// One memory reference from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Read or write.
    pub access: AccessType,
    /// Byte address.
    pub addr: u64,
    /// Originating core.
    pub core_id: u32,
}

impl TraceRecord {
    /// Creates a read reference from core 0.
    pub const fn read(addr: u64) -> Self {
        Self {
            access: AccessType::Read,
            addr,
            core_id: 0,
        }
    }

    /// Creates a write reference from core 0.
    pub const fn write(addr: u64) -> Self {
        Self {
            access: AccessType::Write,
            addr,
            core_id: 0,
        }
    }

    /// Returns `true` for writes.
    pub const fn is_write(&self) -> bool {
        self.access.is_write()
    }
}

impl FromStr for TraceRecord {
    type Err = String;

    /// Parses a single non-comment record. Errors carry a description without a
    /// line number; [`parse_trace`] adds it.
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let mut fields = s.split_whitespace();

        let access = match fields.next() {
            Some("R" | "r" | "L" | "l") => AccessType::Read,
            Some("W" | "w" | "S" | "s") => AccessType::Write,
            Some(op) => return Err(format!("unknown operation `{op}`")),
            None => return Err("empty record".to_string()),
        };

        let raw_addr = fields.next().ok_or("missing address")?;
        let digits = raw_addr
            .strip_prefix("0x")
            .or_else(|| raw_addr.strip_prefix("0X"))
            .unwrap_or(raw_addr);
        let addr = u64::from_str_radix(digits, 16)
            .map_err(|e| format!("bad address `{raw_addr}`: {e}"))?;

        let core_id = match fields.next() {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| format!("bad core id `{raw}`: {e}"))?,
            None => 0,
        };

        if let Some(extra) = fields.next() {
            return Err(format!("unexpected trailing field `{extra}`"));
        }

        Ok(Self {
            access,
            addr,
            core_id,
        })
    }
}

/// Parses a whole trace.
///
/// # Errors
///
/// Returns [`CacheError::TraceParse`] with the 1-based line number of the first
/// malformed record.
pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = line.parse::<TraceRecord>().map_err(|reason| CacheError::TraceParse {
            line: idx + 1,
            reason,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`CacheError::Io`] if the file cannot be read and
/// [`CacheError::TraceParse`] for malformed records.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse_trace(&text)
}
