//! Bundled sample emails used to seed an empty mailbox

use anyhow::{Context, Result};

use crate::models::Email;

const EMAILS_JSON: &str = include_str!("../fixtures/emails.json");

/// The bundled fixture set, in collection order
pub fn bundled_emails() -> Result<Vec<Email>> {
    serde_json::from_str(EMAILS_JSON).context("Failed to parse bundled email fixtures")
}
