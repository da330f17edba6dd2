//! Error types for verifiable-log-merkle

use thiserror::Error;

/// Errors that can occur in Merkle tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument violated a precondition of the called operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid tree size
    #[error("Invalid tree size: {0}")]
    InvalidTreeSize(String),

    /// Invalid leaf index
    #[error("Invalid leaf index: {0}")]
    InvalidLeafIndex(String),

    /// Invalid proof shape (too short, too long)
    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    /// The proof contradicts the tree it claims to describe
    #[error("Inconsistent proof: {0}")]
    Inconsistency(String),

    /// Hash mismatch
    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    /// Hash could not be decoded from its textual form
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
