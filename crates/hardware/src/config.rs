//! Configuration system for the cache model.
//!
//! This module defines the configuration structures used to parameterize a cache. It provides:
//! 1. **Defaults:** Baseline cache geometry when a field is omitted.
//! 2. **Structures:** `CacheConfig` and the validated `Geometry` derived from it.
//! 3. **Enums:** The replacement policy selector.
//!
//! Configuration is supplied as JSON (see [`CacheConfig::from_json`]) or built directly
//! with [`CacheConfig::new`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::{CacheError, Result};

/// Default configuration constants for the cache model.
mod defaults {
    /// Default cache size in bytes (4 KiB).
    pub const CACHE_SIZE: u64 = 4096;

    /// Default cache line size in bytes (64 bytes).
    pub const CACHE_LINE: u64 = 64;

    /// Default associativity (4 ways).
    pub const CACHE_WAYS: u64 = 4;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which line to evict when a new line
/// must be installed into a full set. Invalid ways are always filled first,
/// whichever policy is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Evict the line with the oldest access stamp (LRU).
    #[default]
    #[serde(alias = "Recency", alias = "Lru", alias = "LRU")]
    Recency,
    /// Evict the least frequently hit line (LFU).
    ///
    /// Among lines sharing the lowest frequency, the most recently touched one
    /// is evicted.
    #[serde(alias = "Frequency", alias = "Lfu", alias = "LFU")]
    Frequency,
}

impl ReplacementPolicy {
    /// Returns the lowercase policy name used by the CLI and in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Recency => "recency",
            Self::Frequency => "frequency",
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric selector: `0` is recency, `1` is frequency.
impl TryFrom<u64> for ReplacementPolicy {
    type Error = CacheError;

    fn try_from(selector: u64) -> Result<Self> {
        match selector {
            0 => Ok(Self::Recency),
            1 => Ok(Self::Frequency),
            other => Err(CacheError::UnknownPolicy(other.to_string())),
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = CacheError;

    /// Parses a policy name (`recency`, `lru`, `frequency`, `lfu`, case-insensitive)
    /// or a numeric selector.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(selector) = trimmed.parse::<u64>() {
            return Self::try_from(selector);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "recency" | "lru" => Ok(Self::Recency),
            "frequency" | "lfu" => Ok(Self::Frequency),
            _ => Err(CacheError::UnknownPolicy(trimmed.to_string())),
        }
    }
}

/// Cache configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{ "size_bytes": 32768, "ways": 8, "policy": "LFU" }"#;
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.line_bytes, 64);
/// assert_eq!(config.policy, ReplacementPolicy::Frequency);
/// assert_eq!(config.geometry().unwrap().num_sets, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u64,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: u64,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u64,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Creates a configuration from the four construction scalars.
    ///
    /// The arguments follow the order of the classic `cache_new(size, assoc, linesize, policy)`
    /// entry point. No validation happens here; see [`CacheConfig::geometry`].
    pub const fn new(
        size_bytes: u64,
        ways: u64,
        line_bytes: u64,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            size_bytes,
            line_bytes,
            ways,
            policy,
        }
    }

    /// Decodes a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if the document is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and decodes a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file cannot be read and
    /// [`CacheError::Config`] if it cannot be decoded.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validates the configuration and derives the set count.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any parameter is zero, if the line size
    /// does not divide the capacity, if the associativity does not divide the
    /// number of lines, or if the resulting set count is not a power of two.
    pub fn geometry(&self) -> Result<Geometry> {
        for (field, value) in [
            ("size_bytes", self.size_bytes),
            ("line_bytes", self.line_bytes),
            ("ways", self.ways),
        ] {
            if value == 0 {
                return Err(CacheError::ZeroParameter { field });
            }
        }

        if !self.size_bytes.is_multiple_of(self.line_bytes) {
            return Err(CacheError::LineSizeMismatch {
                size_bytes: self.size_bytes,
                line_bytes: self.line_bytes,
            });
        }
        let lines = self.size_bytes / self.line_bytes;

        if !lines.is_multiple_of(self.ways) {
            return Err(CacheError::WaysMismatch {
                lines,
                ways: self.ways,
            });
        }
        let num_sets = lines / self.ways;

        if !num_sets.is_power_of_two() {
            return Err(CacheError::SetCountNotPowerOfTwo { num_sets });
        }

        Ok(Geometry {
            num_sets: num_sets as usize,
            ways: self.ways as usize,
            line_bytes: self.line_bytes,
        })
    }

    /// Returns the default cache size in bytes.
    const fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    const fn default_line() -> u64 {
        defaults::CACHE_LINE
    }

    /// Returns the default associativity.
    const fn default_ways() -> u64 {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    /// 4 KiB, 64-byte lines, 4-way, recency replacement.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
        }
    }
}

/// Validated cache shape derived from a [`CacheConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Number of sets; always a power of two.
    pub num_sets: usize,
    /// Lines per set.
    pub ways: usize,
    /// Line size in bytes.
    pub line_bytes: u64,
}

impl Geometry {
    /// Total number of lines held by the cache.
    pub const fn total_lines(&self) -> usize {
        self.num_sets * self.ways
    }

    /// Mask applied to a line address to select its set.
    pub const fn set_mask(&self) -> u64 {
        self.num_sets as u64 - 1
    }
}
