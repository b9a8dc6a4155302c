//! Record collections on top of a key-value store
//!
//! A collection is the ordered list of records stored under one key as a
//! JSON array. `CollectionStore` is the synchronous adapter: every call
//! loads the array, operates on it and writes it back.

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{KeyValueStore, StorageError};

/// Length of generated record ids
const ID_LEN: usize = 8;

/// A record that can live in a collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The record's id, if it has been persisted
    fn record_id(&self) -> Option<&str>;

    /// Assign an id (used when posting a new record)
    fn set_record_id(&mut self, id: String);
}

/// Generate a short random record id
pub fn make_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

/// Synchronous collection adapter
pub struct CollectionStore {
    backend: Arc<dyn KeyValueStore>,
    /// Serializes load-modify-save cycles so concurrent writers don't drop records
    write_lock: Mutex<()>,
}

impl CollectionStore {
    /// Create a new collection store over a backend
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying key-value backend
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Load every record in a collection; a missing key is an empty collection
    pub fn load_collection<T: Record>(&self, key: &str) -> Result<Vec<T>> {
        match self.backend.load(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse collection {}", key)),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a collection with the given records
    pub fn save_collection<T: Record>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)
            .with_context(|| format!("Failed to serialize collection {}", key))?;
        self.backend.save(key, &raw)
    }

    /// Load a collection (alias used by the service layer)
    pub fn query<T: Record>(&self, key: &str) -> Result<Vec<T>> {
        self.load_collection(key)
    }

    /// Get a single record by id
    pub fn get<T: Record>(&self, key: &str, id: &str) -> Result<T> {
        self.load_collection::<T>(key)?
            .into_iter()
            .find(|record| record.record_id() == Some(id))
            .ok_or_else(|| StorageError::not_found(key, id).into())
    }

    /// Append a new record, assigning it a fresh id unique in the collection
    pub fn post<T: Record>(&self, key: &str, mut record: T) -> Result<T> {
        let _guard = self.lock()?;
        let mut records = self.load_collection::<T>(key)?;

        let id = loop {
            let candidate = make_id();
            if !records.iter().any(|r| r.record_id() == Some(candidate.as_str())) {
                break candidate;
            }
        };
        record.set_record_id(id);

        records.push(record.clone());
        self.save_collection(key, &records)?;
        debug!(
            "Posted record {} to {} ({} records)",
            record.record_id().unwrap_or_default(),
            key,
            records.len()
        );
        Ok(record)
    }

    /// Replace an existing record in place, keeping its position
    pub fn put<T: Record>(&self, key: &str, record: T) -> Result<T> {
        let id = record
            .record_id()
            .ok_or_else(|| StorageError::MissingId {
                collection: key.to_string(),
            })?
            .to_string();

        let _guard = self.lock()?;
        let mut records = self.load_collection::<T>(key)?;
        let slot = records
            .iter_mut()
            .find(|r| r.record_id() == Some(id.as_str()))
            .ok_or_else(|| StorageError::not_found(key, &id))?;
        *slot = record.clone();

        self.save_collection(key, &records)?;
        Ok(record)
    }

    /// Delete a record by id
    ///
    /// Works on the raw JSON so callers don't need to name the record type.
    pub fn remove(&self, key: &str, id: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut records: Vec<Value> = match self.backend.load(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse collection {}", key))?,
            None => Vec::new(),
        };

        let idx = records
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StorageError::not_found(key, id))?;
        records.remove(idx);

        let raw = serde_json::to_string(&records)?;
        self.backend.save(key, &raw)?;
        debug!("Removed record {} from {}", id, key);
        Ok(())
    }

    /// Write `records` only if the collection is empty, returning its contents
    ///
    /// The emptiness check and the write happen under the write lock, so a
    /// record posted concurrently is never overwritten by the seed.
    pub fn seed_if_empty<T: Record>(&self, key: &str, records: &[T]) -> Result<Vec<T>> {
        let _guard = self.lock()?;
        let existing = self.load_collection::<T>(key)?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        self.save_collection(key, records)?;
        debug!("Seeded {} with {} records", key, records.len());
        Ok(records.to_vec())
    }

    /// Drop a whole collection
    pub fn clear(&self, key: &str) -> Result<()> {
        let _guard = self.lock()?;
        self.backend.remove(key)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow!("collection write lock poisoned"))
    }
}
