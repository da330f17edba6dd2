//! Error types for verifiable-log

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while computing roots and proofs
#[derive(Error, Debug)]
pub enum Error {
    /// Caller passed sizes or indices the log cannot answer for
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Leaf index past the end of the leaf store
    #[error("Leaf {0} not found")]
    LeafNotFound(u64),

    /// The leaf store failed
    ///
    /// Backends other than [`InMemoryLeafStore`](crate::InMemoryLeafStore)
    /// report their own failures (I/O, database, network) through this variant.
    #[error("Leaf store error: {0}")]
    LeafStore(String),

    /// A leaf or memoization call did not complete within the configured bound
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Merkle tree error
    #[error(transparent)]
    Merkle(#[from] verifiable_log_merkle::Error),

    /// Memoization store error
    #[error(transparent)]
    Memo(#[from] verifiable_log_memo::Error),
}

/// Result type for verifiable-log operations
pub type Result<T> = std::result::Result<T, Error>;
