//! Memory Access Types.
//!
//! The cache only distinguishes reads from writes: writes mark lines dirty and
//! are counted separately in the statistics.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read (load). Leaves resident lines clean.
    Read,

    /// Data write (store). Marks the touched or installed line dirty.
    Write,
}

impl AccessType {
    /// Builds an access type from the write flag used by the cache entry points.
    #[inline]
    pub const fn from_write(is_write: bool) -> Self {
        if is_write { Self::Write } else { Self::Read }
    }

    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
