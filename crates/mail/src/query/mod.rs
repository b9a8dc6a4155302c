//! Query helpers for the email service
//!
//! Filtering and navigation over a loaded collection, kept free of storage
//! so the rules are testable in isolation.

mod emails;

pub use emails::{SentBound, filter_emails, matches_status, matches_text, neighbors, sent_bound};
