//! RFC 6962 verifiable log
//!
//! An append-only sequence of leaves authenticated by a Merkle tree. The log
//! computes root hashes for any snapshot, audit proofs that a leaf belongs to
//! a snapshot, and consistency proofs that an older snapshot is a prefix of a
//! newer one. Subtree hashes may be memoized through a pluggable store.
//!
//! Proofs are checked with the stateless verifier re-exported from
//! [`merkle`].

pub mod config;
pub mod error;
pub mod leaf;
pub mod log;
pub mod path;

// Re-export core crates
pub use verifiable_log_memo as memo;
pub use verifiable_log_merkle as merkle;

pub use config::LogConfig;
pub use error::{Error, Result};
pub use leaf::{InMemoryLeafStore, LeafStore};
pub use log::VerifiableLog;
pub use verifiable_log_memo::{CachePolicy, InMemoryStore, MemoizationStore, NoMemoization};
pub use verifiable_log_merkle::{
    verify_audit_proof, verify_consistency_proof, Hash, ProofVerifier, SubtreeRange,
};
