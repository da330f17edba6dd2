//! Merkle tree hashing utilities
//!
//! Implements RFC 6962 compliant Merkle tree hashing with:
//! - Domain separation via prefixes (0x00 for leaf, 0x01 for node)
//! - A pluggable digest function (SHA-256 by default)
//!
//! These constructions are the only place domain separation happens. Everything
//! above this module hashes through an [`Rfc6962Hasher`].

use std::fmt;
use std::marker::PhantomData;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::hash::Hash;

/// Prefix for leaf nodes in RFC 6962 Merkle tree
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix for internal nodes in RFC 6962 Merkle tree
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// Hash size in bytes of the default (SHA-256) instantiation
pub const HASH_SIZE: usize = 32;

/// The RFC 6962 tree hashing constructions over a digest function `D`
///
/// Zero-sized; construct with [`Rfc6962Hasher::new`] or `Default`.
pub struct Rfc6962Hasher<D = Sha256> {
    // fn() -> D keeps the hasher Send + Sync whatever D is
    _digest: PhantomData<fn() -> D>,
}

impl<D> Rfc6962Hasher<D> {
    /// Create a hasher
    pub const fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for Rfc6962Hasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for Rfc6962Hasher<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Rfc6962Hasher<D> {}

impl<D> fmt::Debug for Rfc6962Hasher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rfc6962Hasher")
            .field("digest", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D: Digest> Rfc6962Hasher<D> {
    /// Root of a tree with zero leaves
    ///
    /// Returns: D() (digest of the empty input, no prefix)
    pub fn empty_hash(&self) -> Hash {
        Hash::from_bytes(D::digest(b"").to_vec())
    }

    /// Hash a leaf node
    ///
    /// Returns: D(0x00 || leaf_data)
    pub fn hash_leaf(&self, data: &[u8]) -> Hash {
        let mut hasher = D::new();
        hasher.update([LEAF_HASH_PREFIX]);
        hasher.update(data);
        Hash::from_bytes(hasher.finalize().to_vec())
    }

    /// Hash two child nodes to create a parent node
    ///
    /// Returns: D(0x01 || left || right)
    pub fn hash_children(&self, left: &Hash, right: &Hash) -> Hash {
        let mut hasher = D::new();
        hasher.update([NODE_HASH_PREFIX]);
        hasher.update(left.as_slice());
        hasher.update(right.as_slice());
        Hash::from_bytes(hasher.finalize().to_vec())
    }
}

/// SHA-256 root of the empty tree
pub fn empty_hash() -> Hash {
    Rfc6962Hasher::<Sha256>::new().empty_hash()
}

/// SHA-256 leaf hash: SHA256(0x00 || leaf_data)
pub fn hash_leaf(data: &[u8]) -> Hash {
    Rfc6962Hasher::<Sha256>::new().hash_leaf(data)
}

/// SHA-256 node hash: SHA256(0x01 || left || right)
pub fn hash_children(left: &Hash, right: &Hash) -> Hash {
    Rfc6962Hasher::<Sha256>::new().hash_children(left, right)
}

/// Largest power of two strictly smaller than `n`
///
/// This is the `k` of RFC 6962 §2.1: a subtree of `n > 1` leaves splits into a
/// left subtree of `k` leaves and a right subtree of `n - k` leaves, where
/// `k < n <= 2k`.
pub fn split_point(n: u64) -> Result<u64> {
    if n < 2 {
        return Err(Error::InvalidArgument(format!(
            "split point requires n > 1, got {}",
            n
        )));
    }
    Ok(1 << (bit_length(n - 1) - 1))
}

/// Calculate the position of the most significant bit
pub fn bit_length(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        64 - n.leading_zeros()
    }
}

/// A contiguous run of leaves `[start, start + size)`
///
/// Size 0 is the empty tree, size 1 a single leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubtreeRange {
    /// Zero-based index of the first leaf
    pub start: u64,
    /// Number of leaves
    pub size: u64,
}

impl SubtreeRange {
    /// Create a range
    pub const fn new(start: u64, size: u64) -> Self {
        Self { start, size }
    }

    /// The first `size` leaves of the log, i.e. the tree snapshot of that size
    pub const fn prefix(size: u64) -> Self {
        Self { start: 0, size }
    }

    /// One past the last leaf index
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_leaf(&self) -> bool {
        self.size == 1
    }

    /// Split into the left and right child ranges at [`split_point`]
    ///
    /// Fails for ranges of fewer than two leaves.
    pub fn split(&self) -> Result<(SubtreeRange, SubtreeRange)> {
        let k = split_point(self.size)?;
        Ok((
            SubtreeRange::new(self.start, k),
            SubtreeRange::new(self.start + k, self.size - k),
        ))
    }
}

impl fmt::Display for SubtreeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
