//! Cache model error definitions.
//!
//! This module defines the single error type shared by the cache model. It covers:
//! 1. **Configuration:** Geometries that cannot be indexed by low-bit masking.
//! 2. **Policy Selection:** Replacement-policy selectors that name no known policy.
//! 3. **Misuse:** Operations issued against the wrong cache state.
//! 4. **Trace Loading:** Malformed trace records, unreadable files, and bad config documents.

use thiserror::Error;

/// Errors raised by cache construction, install, and the trace driver.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A size, line size, or associativity of zero.
    #[error("invalid cache geometry: {field} must be non-zero")]
    ZeroParameter {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// Total capacity is not a whole number of lines.
    #[error("invalid cache geometry: line size {line_bytes} does not divide capacity {size_bytes}")]
    LineSizeMismatch {
        /// Total capacity in bytes.
        size_bytes: u64,
        /// Line size in bytes.
        line_bytes: u64,
    },

    /// The number of lines is not a whole number of sets.
    #[error("invalid cache geometry: associativity {ways} does not divide {lines} lines")]
    WaysMismatch {
        /// Total number of lines.
        lines: u64,
        /// Requested associativity.
        ways: u64,
    },

    /// The derived set count cannot be indexed with a low-bit mask.
    #[error("invalid cache geometry: set count {num_sets} is not a power of two")]
    SetCountNotPowerOfTwo {
        /// Derived number of sets.
        num_sets: u64,
    },

    /// A replacement-policy selector that names no supported policy.
    #[error("unknown replacement policy `{0}`")]
    UnknownPolicy(String),

    /// Install was issued for a line that is already resident.
    #[error("line {line_addr:#x} is already resident in set {set_index}")]
    AlreadyResident {
        /// Line address passed to install.
        line_addr: u64,
        /// Set the line maps to.
        set_index: usize,
    },

    /// A trace record could not be parsed.
    #[error("trace line {line}: {reason}")]
    TraceParse {
        /// 1-based line number within the trace.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// A configuration document could not be decoded.
    #[error("failed to parse cache configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Reading a trace or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Returns `true` for errors describing an unusable cache geometry.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ZeroParameter { .. }
                | Self::LineSizeMismatch { .. }
                | Self::WaysMismatch { .. }
                | Self::SetCountNotPowerOfTwo { .. }
        )
    }
}

/// A specialized `Result` type for cache operations.
pub type Result<T, E = CacheError> = std::result::Result<T, E>;
