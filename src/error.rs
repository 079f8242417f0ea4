//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Cache constructed with a capacity of zero
    #[error("invalid cache capacity: {0}")]
    InvalidCapacity(usize),

    /// A finite TTL must be a positive duration
    #[error("ttl must be a positive duration")]
    InvalidTtl,

    /// Key absent from the cache, or present but expired at access time.
    ///
    /// The two cases are deliberately not distinguished: callers cannot tell
    /// "never existed" from "expired" from this error alone.
    #[error("key not found")]
    NotFound,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
