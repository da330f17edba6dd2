//! No-op store implementation (memoization disabled)

use verifiable_log_merkle::{Hash, SubtreeRange};

use crate::{MemoGetFuture, MemoPutFuture, MemoizationStore};

/// A store that doesn't remember anything
///
/// Used whenever a log is built without a memoization store, so the engine
/// always has a store to talk to.
///
/// # Example
///
/// ```
/// use verifiable_log_memo::{MemoizationStore, NoMemoization};
/// use verifiable_log_merkle::{hash_leaf, SubtreeRange};
///
/// # async fn example() -> Result<(), verifiable_log_memo::Error> {
/// let store = NoMemoization;
///
/// // Put does nothing
/// store.put(SubtreeRange::new(0, 1), hash_leaf(b"data")).await?;
///
/// // Get always returns None
/// assert!(store.get(SubtreeRange::new(0, 1)).await?.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemoization;

impl MemoizationStore for NoMemoization {
    fn get(&self, _range: SubtreeRange) -> MemoGetFuture<'_> {
        Box::pin(async { Ok(None) })
    }

    fn put(&self, _range: SubtreeRange, _hash: Hash) -> MemoPutFuture<'_> {
        Box::pin(async { Ok(()) })
    }
}
