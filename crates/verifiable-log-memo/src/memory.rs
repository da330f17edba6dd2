//! In-memory store implementation with selectable retention policy

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use verifiable_log_merkle::{Hash, SubtreeRange};

use crate::{CachePolicy, MemoGetFuture, MemoPutFuture, MemoizationStore};

/// In-memory subtree hash store
///
/// Keeps the hashes of the ranges its [`CachePolicy`] admits; offers for any
/// other range are dropped. Last writer wins, which is harmless because every
/// writer computes the same hash for the same range.
///
/// Cloning shares the underlying map. Not persistent across process restarts.
///
/// # Example
///
/// ```
/// use verifiable_log_memo::{CachePolicy, InMemoryStore, MemoizationStore};
/// use verifiable_log_merkle::{hash_leaf, SubtreeRange};
///
/// # async fn example() -> Result<(), verifiable_log_memo::Error> {
/// let store = InMemoryStore::with_policy(CachePolicy::PowerOfTwoNoLeaves);
///
/// // Single leaves are not kept under this policy
/// store.put(SubtreeRange::new(0, 1), hash_leaf(b"a")).await?;
/// assert!(store.is_empty().await);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    policy: CachePolicy,
    /// The actual storage
    entries: Arc<RwLock<HashMap<SubtreeRange, Hash>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store that keeps every range
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::All)
    }

    /// Create a new empty store keeping only the ranges `policy` admits
    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Get the number of remembered ranges
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Forget everything
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl MemoizationStore for InMemoryStore {
    fn get(&self, range: SubtreeRange) -> MemoGetFuture<'_> {
        Box::pin(async move { Ok(self.entries.read().await.get(&range).cloned()) })
    }

    fn put(&self, range: SubtreeRange, hash: Hash) -> MemoPutFuture<'_> {
        Box::pin(async move {
            if !self.policy.admits(range) {
                tracing::trace!("Policy {:?} declines {}", self.policy, range);
                return Ok(());
            }

            let mut entries = self.entries.write().await;
            entries.insert(range, hash);

            Ok(())
        })
    }
}
