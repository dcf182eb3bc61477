
/// Shared access clock.
pub mod clock;

/// Install: victim snapshot, dirty evictions, misuse, construction.
pub mod install;
