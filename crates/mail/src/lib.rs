//! Mail crate - Business logic for the Appsus mailbox
//!
//! This crate provides platform-independent mail functionality including:
//! - Domain models (Email, EmailFilter)
//! - Key-value storage backends and the record collection adapters on top
//! - Filter and navigation helpers over a loaded collection
//! - The email service used by front ends (query, save, toggles, trash)
//!
//! This crate has zero UI dependencies.

pub mod clock;
pub mod config;
pub mod fixtures;
pub mod models;
pub mod query;
pub mod service;
pub mod storage;

pub use config::MailConfig;
pub use models::{Email, EmailBuilder, EmailFilter, EmailId, MailStatus, NavigableEmail, SentWithin};
pub use query::{SentBound, filter_emails, neighbors, sent_bound};
pub use service::{EMAIL_KEY, EmailService, TrashOutcome};
pub use storage::{
    AsyncCollectionStore, CollectionStore, InMemoryStore, KeyValueStore, Record, SqliteStore,
    StorageError,
};
