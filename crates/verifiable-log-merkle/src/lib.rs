//! RFC 6962 Merkle tree primitives for verifiable logs
//!
//! This crate implements the hashing constructions of RFC 6962 and the
//! verification side of its two proof kinds: audit (inclusion) proofs and
//! consistency proofs. It knows nothing about leaf storage or memoization,
//! which is what makes its verdicts independent of the log that produced a
//! proof.

pub mod error;
pub mod hash;
pub mod proof;
pub mod tree;

pub use error::{Error, Result};
pub use hash::Hash;
pub use proof::{
    check_audit_proof, check_consistency_proof, verify_audit_proof, verify_consistency_proof,
    ProofVerifier,
};
pub use tree::{
    empty_hash, hash_children, hash_leaf, split_point, Rfc6962Hasher, SubtreeRange, HASH_SIZE,
    LEAF_HASH_PREFIX, NODE_HASH_PREFIX,
};

/// Re-exported so callers can name digest types without a direct sha2 dependency
pub use sha2::{Digest, Sha256};
