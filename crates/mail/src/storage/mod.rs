//! Storage traits and implementations
//!
//! Layered as: a raw `KeyValueStore` (in-memory or SQLite), the synchronous
//! `CollectionStore` that keeps ordered record arrays under each key, and
//! the `AsyncCollectionStore` that adds a fixed simulated latency.

mod collection;
mod error;
mod latency;
mod memory;
mod sqlite;
mod traits;

pub use collection::{CollectionStore, Record, make_id};
pub use error::StorageError;
pub use latency::AsyncCollectionStore;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
