//! Access to the leaves of a log
//!
//! The log never owns leaf data. It reads leaves by index through a
//! [`LeafStore`] for the duration of one hash computation and drops them
//! afterwards.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// Future returned by [`LeafStore::get_leaf`]
pub type LeafFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Future returned by [`LeafStore::leaf_count`]
pub type LeafCountFuture<'a> = Pin<Box<dyn Future<Output = Result<u64>> + Send + 'a>>;

/// Trait for leaf storage backends
///
/// A store must present a consistent view for the duration of one root or
/// proof computation: leaves below the reported count do not change.
pub trait LeafStore: Send + Sync {
    /// Get the raw bytes of the leaf at `index`
    ///
    /// Callers only ask for indices below [`LeafStore::leaf_count`].
    fn get_leaf(&self, index: u64) -> LeafFuture<'_>;

    /// Get the total number of leaves
    fn leaf_count(&self) -> LeafCountFuture<'_>;
}

impl<T: LeafStore + ?Sized> LeafStore for Arc<T> {
    fn get_leaf(&self, index: u64) -> LeafFuture<'_> {
        (**self).get_leaf(index)
    }

    fn leaf_count(&self) -> LeafCountFuture<'_> {
        (**self).leaf_count()
    }
}

/// Append-only in-memory leaf store
///
/// Cloning shares the underlying leaves, so one handle can keep appending
/// while a log reads through another.
///
/// # Example
///
/// ```
/// use verifiable_log::{InMemoryLeafStore, LeafStore};
///
/// # async fn example() -> verifiable_log::Result<()> {
/// let store = InMemoryLeafStore::new();
/// let index = store.append(b"hello".to_vec()).await;
///
/// assert_eq!(index, 0);
/// assert_eq!(store.get_leaf(0).await?, b"hello");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeafStore {
    leaves: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl InMemoryLeafStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `leaves` in order
    pub fn from_leaves<I, B>(leaves: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self {
            leaves: Arc::new(RwLock::new(leaves.into_iter().map(Into::into).collect())),
        }
    }

    /// Append a leaf, returning its index
    pub async fn append(&self, leaf: impl Into<Vec<u8>>) -> u64 {
        let mut leaves = self.leaves.write().await;
        leaves.push(leaf.into());
        (leaves.len() - 1) as u64
    }

    /// Number of leaves
    pub async fn len(&self) -> u64 {
        self.leaves.read().await.len() as u64
    }

    pub async fn is_empty(&self) -> bool {
        self.leaves.read().await.is_empty()
    }
}

impl LeafStore for InMemoryLeafStore {
    fn get_leaf(&self, index: u64) -> LeafFuture<'_> {
        Box::pin(async move {
            let leaves = self.leaves.read().await;
            usize::try_from(index)
                .ok()
                .and_then(|i| leaves.get(i))
                .cloned()
                .ok_or(Error::LeafNotFound(index))
        })
    }

    fn leaf_count(&self) -> LeafCountFuture<'_> {
        Box::pin(async move { Ok(self.len().await) })
    }
}
