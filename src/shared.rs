use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::bloom_filter::BloomFilter;
use crate::error::Result;
use crate::hasher::Indexes;

/// A [`BloomFilter`] that can be shared between threads.
///
/// Inserts hold the write lock and queries hold the read lock for the whole
/// operation, so a query never observes a half-applied insert.
#[derive(Debug, Clone)]
pub struct SharedBloomFilter {
    inner: Arc<RwLock<BloomFilter>>,
}

impl SharedBloomFilter {
    pub fn new(filter: BloomFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
        }
    }

    pub fn with_size(size: usize) -> Result<Self> {
        BloomFilter::with_size(size).map(Self::new)
    }

    pub fn insert(&self, item: &str) {
        self.write().insert(item);
    }

    pub fn insert_indexes(&self, indexes: &Indexes) -> Result<()> {
        self.write().insert_indexes(indexes)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.read().contains(item)
    }

    pub fn contains_indexes(&self, indexes: &Indexes) -> Result<bool> {
        self.read().contains_indexes(indexes)
    }

    /// Runs `f` against a consistent view of the filter.
    pub fn with_filter<T>(&self, f: impl FnOnce(&BloomFilter) -> T) -> T {
        f(&self.read())
    }

    // Bits are only ever set, so a writer that panicked cannot have broken
    // the invariants of the array.
    fn read(&self) -> RwLockReadGuard<'_, BloomFilter> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("recovering bloom filter from poisoned lock");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, BloomFilter> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("recovering bloom filter from poisoned lock");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl From<BloomFilter> for SharedBloomFilter {
    fn from(filter: BloomFilter) -> Self {
        Self::new(filter)
    }
}
