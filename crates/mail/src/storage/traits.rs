//! Storage trait definitions

use anyhow::Result;

/// Trait for the local key-value store backing every collection
///
/// Each key holds one serialized collection (a JSON array of records).
/// Implementations only move text in and out; record semantics live in
/// `CollectionStore`.
pub trait KeyValueStore: Send + Sync {
    /// Load the raw value stored under a key
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store a raw value under a key, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key (no-op if absent)
    fn remove(&self, key: &str) -> Result<()>;
}
