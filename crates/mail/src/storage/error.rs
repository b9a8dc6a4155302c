//! Typed storage errors callers may need to tell apart

use thiserror::Error;

/// Conditions raised by collection operations
///
/// Returned inside `anyhow::Error`; recover with `err.downcast_ref::<StorageError>()`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no record with id {id} in collection {collection}")]
    NotFound { collection: String, id: String },
    #[error("cannot update a record without an id in collection {collection}")]
    MissingId { collection: String },
}

impl StorageError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StorageError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether an `anyhow::Error` is a not-found condition
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::NotFound { .. })
        )
    }
}
