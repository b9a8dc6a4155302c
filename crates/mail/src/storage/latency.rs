//! Asynchronous collection adapter with simulated latency
//!
//! Wraps a shared `CollectionStore` and sleeps for a fixed delay before
//! every operation, emulating a remote backend. The delay cannot be
//! cancelled; otherwise the semantics are those of the synchronous store.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use super::{CollectionStore, InMemoryStore, KeyValueStore, Record};

/// Async view over a collection store
#[derive(Clone)]
pub struct AsyncCollectionStore {
    inner: Arc<CollectionStore>,
    latency: Duration,
}

impl AsyncCollectionStore {
    /// Wrap a collection store with the given per-operation delay
    pub fn new(inner: Arc<CollectionStore>, latency: Duration) -> Self {
        Self { inner, latency }
    }

    /// Build directly over a key-value backend
    pub fn over(backend: Arc<dyn KeyValueStore>, latency: Duration) -> Self {
        Self::new(Arc::new(CollectionStore::new(backend)), latency)
    }

    /// In-memory store with no delay, mostly for tests
    pub fn in_memory() -> Self {
        Self::over(Arc::new(InMemoryStore::new()), Duration::ZERO)
    }

    /// The synchronous store underneath
    pub fn sync(&self) -> &CollectionStore {
        &self.inner
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Load a whole collection after the delay
    pub async fn query<T: Record>(&self, key: &str) -> Result<Vec<T>> {
        self.delay().await;
        self.inner.query(key)
    }

    /// Fetch one record by id; not-found if absent
    pub async fn get<T: Record>(&self, key: &str, id: &str) -> Result<T> {
        self.delay().await;
        self.inner.get(key, id)
    }

    /// Append a record under a fresh id and return it
    pub async fn post<T: Record>(&self, key: &str, record: T) -> Result<T> {
        self.delay().await;
        self.inner.post(key, record)
    }

    /// Replace the record with the same id in place
    pub async fn put<T: Record>(&self, key: &str, record: T) -> Result<T> {
        self.delay().await;
        self.inner.put(key, record)
    }

    /// Delete a record by id; not-found if absent
    pub async fn remove(&self, key: &str, id: &str) -> Result<()> {
        self.delay().await;
        self.inner.remove(key, id)
    }
}
