//! Common types shared across the cache model.
//!
//! This module provides:
//! 1. **Access Types:** The read/write classification of a memory reference.
//! 2. **Error Handling:** The crate error type and `Result` alias.

/// Memory access type definitions.
pub mod data;

/// Error types for construction, install, and trace loading.
pub mod error;

pub use data::AccessType;
pub use error::{CacheError, Result};
