//! Memoization of Merkle subtree hashes
//!
//! Computing the root of a large log from scratch touches every leaf. This
//! crate defines the contract through which a tree hash engine can remember
//! the hash of a subtree range `(start, size)` and reuse it later:
//!
//! - [`NoMemoization`]: remembers nothing (the default)
//! - [`InMemoryStore`]: in-process map, filtered by a [`CachePolicy`]
//!
//! Stores are free to forget or refuse anything; the engine treats a miss as
//! "compute it". What a store must never do is return a hash for a range that
//! was not computed for the same leaves.
//!
//! # Example
//!
//! ```
//! use verifiable_log_memo::{CachePolicy, InMemoryStore, MemoizationStore};
//! use verifiable_log_merkle::{hash_leaf, SubtreeRange};
//!
//! # async fn example() -> Result<(), verifiable_log_memo::Error> {
//! let store = InMemoryStore::with_policy(CachePolicy::PowerOfTwo);
//!
//! store.put(SubtreeRange::new(0, 1), hash_leaf(b"a")).await?;
//! assert!(store.get(SubtreeRange::new(0, 1)).await?.is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod noop;

pub use error::{Error, Result};
pub use memory::InMemoryStore;
pub use noop::NoMemoization;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use verifiable_log_merkle::{Hash, SubtreeRange};

/// Future returned by [`MemoizationStore::get`]
pub type MemoGetFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<Hash>>> + Send + 'a>>;

/// Future returned by [`MemoizationStore::put`]
pub type MemoPutFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Which subtree ranges an in-memory store keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Every range
    #[default]
    All,
    /// Ranges whose start and size are each zero or a power of two
    PowerOfTwo,
    /// Ranges whose size is a power of two greater than one (no single leaves)
    PowerOfTwoNoLeaves,
}

impl CachePolicy {
    /// Whether a store using this policy keeps `range`
    pub fn admits(&self, range: SubtreeRange) -> bool {
        match self {
            CachePolicy::All => true,
            CachePolicy::PowerOfTwo => {
                zero_or_power_of_two(range.start) && zero_or_power_of_two(range.size)
            }
            CachePolicy::PowerOfTwoNoLeaves => range.size > 1 && range.size.is_power_of_two(),
        }
    }
}

fn zero_or_power_of_two(n: u64) -> bool {
    n == 0 || n.is_power_of_two()
}

/// Trait for subtree hash memoization backends
///
/// Both operations are asynchronous so that implementations may sit on top of
/// a network cache or database. Writes are idempotent for fixed leaf contents,
/// so concurrent writers for the same range need no coordination.
pub trait MemoizationStore: Send + Sync {
    /// Get the remembered hash of `range`
    ///
    /// Returns `Ok(None)` if the range is unknown. An implementation may
    /// return `Ok(None)` even after a successful `put` for the same range.
    fn get(&self, range: SubtreeRange) -> MemoGetFuture<'_>;

    /// Offer the hash of `range` for remembering
    ///
    /// Implementations may decline to keep it.
    fn put(&self, range: SubtreeRange, hash: Hash) -> MemoPutFuture<'_>;
}

// Also implement MemoizationStore for Arc<T> where T: MemoizationStore
impl<T: MemoizationStore + ?Sized> MemoizationStore for Arc<T> {
    fn get(&self, range: SubtreeRange) -> MemoGetFuture<'_> {
        (**self).get(range)
    }

    fn put(&self, range: SubtreeRange, hash: Hash) -> MemoPutFuture<'_> {
        (**self).put(range, hash)
    }
}

// Implement MemoizationStore for Box<dyn MemoizationStore>
impl MemoizationStore for Box<dyn MemoizationStore> {
    fn get(&self, range: SubtreeRange) -> MemoGetFuture<'_> {
        (**self).get(range)
    }

    fn put(&self, range: SubtreeRange, hash: Hash) -> MemoPutFuture<'_> {
        (**self).put(range, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_all() {
        assert!(CachePolicy::All.admits(SubtreeRange::new(3, 5)));
        assert!(CachePolicy::All.admits(SubtreeRange::new(0, 0)));
    }

    #[test]
    fn test_policy_power_of_two() {
        let policy = CachePolicy::PowerOfTwo;
        assert!(policy.admits(SubtreeRange::new(0, 0)));
        assert!(policy.admits(SubtreeRange::new(0, 1)));
        assert!(policy.admits(SubtreeRange::new(4, 4)));
        assert!(policy.admits(SubtreeRange::new(8, 2)));
        assert!(!policy.admits(SubtreeRange::new(3, 1)));
        assert!(!policy.admits(SubtreeRange::new(0, 6)));
        assert!(!policy.admits(SubtreeRange::new(12, 4)));
    }

    #[test]
    fn test_policy_power_of_two_no_leaves() {
        let policy = CachePolicy::PowerOfTwoNoLeaves;
        assert!(policy.admits(SubtreeRange::new(0, 2)));
        assert!(policy.admits(SubtreeRange::new(12, 4)));
        assert!(!policy.admits(SubtreeRange::new(0, 1)));
        assert!(!policy.admits(SubtreeRange::new(0, 0)));
        assert!(!policy.admits(SubtreeRange::new(0, 3)));
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: CachePolicy = serde_json::from_str("\"power-of-two-no-leaves\"").unwrap();
        assert_eq!(policy, CachePolicy::PowerOfTwoNoLeaves);
        assert_eq!(
            serde_json::to_string(&CachePolicy::PowerOfTwo).unwrap(),
            "\"power-of-two\""
        );
    }
}
