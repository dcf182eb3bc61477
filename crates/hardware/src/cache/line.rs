//! Cache line storage slot.

/// Coherence-free state of a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Slot holds no data and is always the first choice for a fill.
    Invalid,
    /// Resident and unmodified since install.
    Clean,
    /// Resident and written since install; evicting it requires a writeback.
    Dirty,
}

/// One way of a cache set.
///
/// When `valid` is false the remaining fields carry no meaning and never
/// influence victim selection beyond making the slot the victim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Slot holds live data.
    pub valid: bool,
    /// Full line address of the resident line.
    pub tag: u64,
    /// Written since install.
    pub dirty: bool,
    /// Clock stamp of the most recent hit or install.
    pub last_access_time: u64,
    /// Hits since install, plus one for the install itself.
    pub frequency: u64,
}

impl CacheLine {
    /// Returns `true` if this slot holds `tag`.
    #[inline]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Current state of the line.
    pub const fn state(&self) -> LineState {
        match (self.valid, self.dirty) {
            (false, _) => LineState::Invalid,
            (true, false) => LineState::Clean,
            (true, true) => LineState::Dirty,
        }
    }

    /// Returns `true` if evicting this line needs a writeback.
    #[inline]
    pub const fn needs_writeback(&self) -> bool {
        self.valid && self.dirty
    }
}
