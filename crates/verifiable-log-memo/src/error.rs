//! Error types for the memoization crate

/// Result type for memoization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing memoized hashes
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing store failed (network, database, ...)
    #[error("Memoization backend error: {0}")]
    Backend(String),
}
