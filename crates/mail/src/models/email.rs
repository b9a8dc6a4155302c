//! Email record model

use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock;
use crate::storage::Record;

/// Unique identifier for an email within its collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailId(pub String);

impl EmailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EmailId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EmailId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single email record as persisted in the mail collection
///
/// Field names serialize in camelCase and timestamps as epoch milliseconds,
/// which is the shape the stored collection has always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    /// Collection id; `None` until the record is first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmailId>,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "ts_milliseconds_option")]
    pub sent_at: Option<DateTime<Utc>>,
    /// Set when the email is moved to trash. The only removal signal.
    #[serde(default, with = "ts_milliseconds_option")]
    pub removed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub is_marked: bool,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub is_sent: bool,
}

impl Email {
    /// Create a new email builder
    pub fn builder() -> EmailBuilder {
        EmailBuilder::new()
    }

    /// Whether the email has been moved to trash
    pub fn is_removed(&self) -> bool {
        self.removed_at.is_some()
    }
}

impl Record for Email {
    fn record_id(&self) -> Option<&str> {
        self.id.as_ref().map(EmailId::as_str)
    }

    fn set_record_id(&mut self, id: String) {
        self.id = Some(EmailId(id));
    }
}

/// An email decorated with the ids of its neighbours in the collection
///
/// Navigation wraps: the last email's `next_email_id` is the first email,
/// and the first email's `prev_email_id` is the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigableEmail {
    #[serde(flatten)]
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_email_id: Option<EmailId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_email_id: Option<EmailId>,
}

impl NavigableEmail {
    /// Wrap an email without navigation links
    pub fn undecorated(email: Email) -> Self {
        Self {
            email,
            next_email_id: None,
            prev_email_id: None,
        }
    }
}

/// Builder for creating Email instances
pub struct EmailBuilder {
    id: Option<EmailId>,
    created_at: Option<DateTime<Utc>>,
    sent_at: Option<DateTime<Utc>>,
    removed_at: Option<DateTime<Utc>>,
    subject: String,
    body: String,
    from: String,
    to: String,
    is_read: bool,
    is_starred: bool,
    is_marked: bool,
    is_draft: bool,
    is_sent: bool,
}

impl EmailBuilder {
    fn new() -> Self {
        Self {
            id: None,
            created_at: None,
            sent_at: None,
            removed_at: None,
            subject: String::new(),
            body: String::new(),
            from: String::new(),
            to: String::new(),
            is_read: false,
            is_starred: false,
            is_marked: false,
            is_draft: false,
            is_sent: false,
        }
    }

    pub fn id(mut self, id: impl Into<EmailId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn sent_at(mut self, sent_at: Option<DateTime<Utc>>) -> Self {
        self.sent_at = sent_at;
        self
    }

    pub fn removed_at(mut self, removed_at: Option<DateTime<Utc>>) -> Self {
        self.removed_at = removed_at;
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn starred(mut self, is_starred: bool) -> Self {
        self.is_starred = is_starred;
        self
    }

    pub fn marked(mut self, is_marked: bool) -> Self {
        self.is_marked = is_marked;
        self
    }

    pub fn draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    pub fn sent(mut self, is_sent: bool) -> Self {
        self.is_sent = is_sent;
        self
    }

    pub fn build(self) -> Email {
        Email {
            id: self.id,
            created_at: self.created_at.unwrap_or_else(clock::now),
            sent_at: self.sent_at,
            removed_at: self.removed_at,
            subject: self.subject,
            body: self.body,
            from: self.from,
            to: self.to,
            is_read: self.is_read,
            is_starred: self.is_starred,
            is_marked: self.is_marked,
            is_draft: self.is_draft,
            is_sent: self.is_sent,
        }
    }
}
