//! Domain models for mail entities

mod email;
mod filter;

pub use email::{Email, EmailBuilder, EmailId, NavigableEmail};
pub use filter::{EmailFilter, MailStatus, SentWithin, UnknownVariant};
