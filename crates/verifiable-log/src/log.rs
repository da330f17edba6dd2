//! The verifiable log: tree hashes and proof generation
//!
//! Every hash the log produces goes through [`VerifiableLog::subtree_hash`],
//! which consults the memoization store before recursing and offers each
//! freshly computed hash back to it. Memoization never changes a result: the
//! hash of a range is a pure function of the leaves in it.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use verifiable_log_memo::{InMemoryStore, MemoizationStore, NoMemoization};
use verifiable_log_merkle::{Digest, Hash, Rfc6962Hasher, Sha256, SubtreeRange};

use crate::config::LogConfig;
use crate::error::{Error, Result};
use crate::leaf::LeafStore;
use crate::path::{audit_path, consistency_path};

/// Future returned by [`VerifiableLog::subtree_hash`]
pub type HashFuture<'a> = Pin<Box<dyn Future<Output = Result<Hash>> + Send + 'a>>;

/// An append-only log of leaves, authenticated by an RFC 6962 Merkle tree
///
/// Tree snapshots are identified by their leaf count: the snapshot of size
/// `n` covers leaves `[0, n)`. Proofs produced here are checked with
/// [`verifiable_log_merkle::ProofVerifier`], which needs neither the leaves
/// nor the memoization store.
///
/// # Example
///
/// ```
/// use verifiable_log::{InMemoryLeafStore, VerifiableLog};
/// use verifiable_log_merkle::verify_audit_proof;
///
/// # async fn example() -> verifiable_log::Result<()> {
/// let leaves = InMemoryLeafStore::from_leaves([b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
/// let log = VerifiableLog::new(leaves);
///
/// let root = log.current_root().await?;
/// let proof = log.audit_proof(1, 3).await?;
/// assert!(verify_audit_proof(&root, 3, 1, &proof, b"b"));
/// # Ok(())
/// # }
/// ```
pub struct VerifiableLog<L, D = Sha256> {
    leaves: L,
    memo: Arc<dyn MemoizationStore>,
    hasher: Rfc6962Hasher<D>,
    boundary_timeout: Option<Duration>,
}

impl<L: LeafStore> VerifiableLog<L> {
    /// Create a SHA-256 log that memoizes nothing
    pub fn new(leaves: L) -> Self {
        Self::with_memoization(leaves, NoMemoization)
    }

    /// Create a SHA-256 log that memoizes subtree hashes in `store`
    pub fn with_memoization(leaves: L, store: impl MemoizationStore + 'static) -> Self {
        Self {
            leaves,
            memo: Arc::new(store),
            hasher: Rfc6962Hasher::new(),
            boundary_timeout: None,
        }
    }

    /// Create a SHA-256 log as described by `config`
    pub fn from_config(leaves: L, config: &LogConfig) -> Self {
        let log = match config.memoization {
            Some(policy) => Self::with_memoization(leaves, InMemoryStore::with_policy(policy)),
            None => Self::new(leaves),
        };
        Self {
            boundary_timeout: config.boundary_timeout,
            ..log
        }
    }
}

impl<L: LeafStore, D: Digest> VerifiableLog<L, D> {
    /// Switch the digest function used for every hash
    ///
    /// The memoization store is dropped and replaced by [`NoMemoization`]: the
    /// hashes it holds were computed with the previous digest. Attach a store
    /// for the new digest with [`VerifiableLog::with_store`].
    pub fn with_hasher<D2: Digest>(self, hasher: Rfc6962Hasher<D2>) -> VerifiableLog<L, D2> {
        VerifiableLog {
            leaves: self.leaves,
            memo: Arc::new(NoMemoization),
            hasher,
            boundary_timeout: self.boundary_timeout,
        }
    }

    /// Memoize subtree hashes in `store` from now on
    ///
    /// `store` must only hold hashes computed with this log's digest over the
    /// same leaves.
    pub fn with_store(mut self, store: impl MemoizationStore + 'static) -> Self {
        self.memo = Arc::new(store);
        self
    }

    /// Bound every leaf-store and memoization-store call by `timeout`
    pub fn with_boundary_timeout(mut self, timeout: Duration) -> Self {
        self.boundary_timeout = Some(timeout);
        self
    }

    /// The leaf store this log reads from
    pub fn leaves(&self) -> &L {
        &self.leaves
    }

    /// Root hash over all leaves currently in the store
    pub async fn current_root(&self) -> Result<Hash> {
        let tree_size = self.leaf_count().await?;
        let root = self.subtree_hash(SubtreeRange::prefix(tree_size)).await?;
        tracing::debug!("Computed root of tree size {}: {}", tree_size, root);
        Ok(root)
    }

    /// Root hash of the snapshot made of the first `tree_size` leaves
    pub async fn root_at(&self, tree_size: u64) -> Result<Hash> {
        let leaf_count = self.leaf_count().await?;
        if tree_size > leaf_count {
            return Err(Error::InvalidArgument(format!(
                "tree size {} exceeds leaf count {}",
                tree_size, leaf_count
            )));
        }
        self.subtree_hash(SubtreeRange::prefix(tree_size)).await
    }

    /// Hash of the subtree over `range`
    ///
    /// Returns the memoized hash when the store has one; otherwise computes it
    /// from the two child ranges (or the leaf itself) and offers the result to
    /// the store. Nothing is stored for a computation that fails part way.
    pub fn subtree_hash(&self, range: SubtreeRange) -> HashFuture<'_> {
        Box::pin(async move {
            if let Some(hash) = self.bounded("memoization get", self.memo.get(range)).await? {
                tracing::trace!("Memoized hash hit for {}", range);
                return Ok(hash);
            }
            tracing::trace!("Memoized hash miss for {}", range);

            let hash = if range.is_empty() {
                self.hasher.empty_hash()
            } else if range.is_leaf() {
                let leaf = self
                    .bounded("leaf read", self.leaves.get_leaf(range.start))
                    .await?;
                self.hasher.hash_leaf(&leaf)
            } else {
                let (left, right) = range.split()?;
                let left_hash = self.subtree_hash(left).await?;
                let right_hash = self.subtree_hash(right).await?;
                self.hasher.hash_children(&left_hash, &right_hash)
            };

            self.bounded("memoization put", self.memo.put(range, hash.clone()))
                .await?;
            Ok(hash)
        })
    }

    /// Audit proof that the leaf at `leaf_index` is in the snapshot of `tree_size` leaves
    ///
    /// Hashes are ordered from the leaf's nearest sibling to the top-level
    /// sibling. Snapshots of zero or one leaf have an empty proof.
    pub async fn audit_proof(&self, leaf_index: u64, tree_size: u64) -> Result<Vec<Hash>> {
        let leaf_count = self.leaf_count().await?;
        if tree_size > leaf_count {
            return Err(Error::InvalidArgument(format!(
                "tree size {} exceeds leaf count {}",
                tree_size, leaf_count
            )));
        }
        if leaf_index >= tree_size.max(1) {
            return Err(Error::InvalidArgument(format!(
                "leaf index {} out of range for tree size {}",
                leaf_index, tree_size
            )));
        }

        let ranges = audit_path(leaf_index, SubtreeRange::prefix(tree_size))?;
        let proof = self.hash_ranges(&ranges).await?;
        tracing::debug!(
            "Computed audit proof for leaf {} in tree of size {} ({} hashes)",
            leaf_index,
            tree_size,
            proof.len()
        );
        Ok(proof)
    }

    /// Consistency proof that the snapshot of `tree_size1` leaves is a prefix
    /// of the snapshot of `tree_size2` leaves
    ///
    /// Requires `0 < tree_size1 <= tree_size2`. Equal sizes have an empty proof.
    pub async fn consistency_proof(&self, tree_size1: u64, tree_size2: u64) -> Result<Vec<Hash>> {
        if tree_size1 == 0 {
            return Err(Error::InvalidArgument(
                "tree_size1 must be strictly positive".to_string(),
            ));
        }
        if tree_size1 > tree_size2 {
            return Err(Error::InvalidArgument(format!(
                "tree_size1 {} exceeds tree_size2 {}",
                tree_size1, tree_size2
            )));
        }
        let leaf_count = self.leaf_count().await?;
        if tree_size2 > leaf_count {
            return Err(Error::InvalidArgument(format!(
                "tree size {} exceeds leaf count {}",
                tree_size2, leaf_count
            )));
        }

        let ranges = consistency_path(tree_size1, tree_size2)?;
        let proof = self.hash_ranges(&ranges).await?;
        tracing::debug!(
            "Computed consistency proof between tree sizes {} and {} ({} hashes)",
            tree_size1,
            tree_size2,
            proof.len()
        );
        Ok(proof)
    }

    async fn hash_ranges(&self, ranges: &[SubtreeRange]) -> Result<Vec<Hash>> {
        let mut hashes = Vec::with_capacity(ranges.len());
        for range in ranges {
            hashes.push(self.subtree_hash(*range).await?);
        }
        Ok(hashes)
    }

    async fn leaf_count(&self) -> Result<u64> {
        self.bounded("leaf count", self.leaves.leaf_count()).await
    }

    /// Await a collaborator call, giving up after the configured bound
    async fn bounded<T, E, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        Error: From<E>,
    {
        let outcome = match self.boundary_timeout {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .map_err(|_| Error::Timeout { operation, after })?,
            None => call.await,
        };
        Ok(outcome?)
    }
}

impl<L: fmt::Debug, D> fmt::Debug for VerifiableLog<L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifiableLog")
            .field("leaves", &self.leaves)
            .field("hasher", &self.hasher)
            .field("boundary_timeout", &self.boundary_timeout)
            .finish_non_exhaustive()
    }
}
