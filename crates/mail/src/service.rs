//! Email service: filtering and record mutations over the mail collection
//!
//! Every operation goes through the async storage adapter. Toggles are
//! read-modify-write cycles; they run under a service-wide lock so two
//! toggles racing on the same email apply one after the other instead of
//! the later write silently discarding the earlier one.

use anyhow::{Context, Result};
use chrono::Duration;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::clock;
use crate::config::MailConfig;
use crate::fixtures::bundled_emails;
use crate::models::{Email, EmailFilter, EmailId, NavigableEmail};
use crate::query::{filter_emails, neighbors};
use crate::storage::{AsyncCollectionStore, InMemoryStore, KeyValueStore, SqliteStore};

/// Storage key of the mail collection
pub const EMAIL_KEY: &str = "mailDB";

/// How far `empty_email` backdates a draft's creation time
const DRAFT_BACKDATE_MINUTES: i64 = 10;

/// Result of `toggle_trash`
#[derive(Debug, Clone, PartialEq)]
pub enum TrashOutcome {
    /// The email was moved to trash and is still in the collection
    Trashed(Email),
    /// The email was already in trash and has been deleted for good
    Deleted(EmailId),
}

/// Email filtering and mutation service
pub struct EmailService {
    store: AsyncCollectionStore,
    user_email: String,
    toggle_lock: Mutex<()>,
}

impl EmailService {
    /// Create a service over an async store, sending as `user_email`
    pub fn new(store: AsyncCollectionStore, user_email: impl Into<String>) -> Self {
        Self {
            store,
            user_email: user_email.into(),
            toggle_lock: Mutex::new(()),
        }
    }

    /// Open the persistent SQLite-backed service described by `config`
    pub fn open(config: &MailConfig) -> Result<Self> {
        let path = config
            .database_path()
            .context("Could not determine mail database location")?;
        let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(&path)?);
        info!("Using mail database at {}", path.display());
        Ok(Self::with_backend(backend, config))
    }

    /// Service over a volatile in-memory store
    pub fn in_memory(config: &MailConfig) -> Self {
        Self::with_backend(Arc::new(InMemoryStore::new()), config)
    }

    /// Service over any key-value backend, using the config's latency and user
    pub fn with_backend(backend: Arc<dyn KeyValueStore>, config: &MailConfig) -> Self {
        let store = AsyncCollectionStore::over(backend, config.storage_latency());
        Self::new(store, config.user_email.clone())
    }

    /// The async store this service writes through
    pub fn store(&self) -> &AsyncCollectionStore {
        &self.store
    }

    /// The filter a fresh listing starts from
    pub fn default_filter() -> EmailFilter {
        EmailFilter::default()
    }

    /// Emails matching `filter`, in collection order
    ///
    /// Seeds the collection from the bundled fixtures the first time it is
    /// found empty. Never modifies stored records.
    pub async fn query(&self, filter: &EmailFilter) -> Result<Vec<Email>> {
        let emails = self.load_or_seed().await?;
        let total = emails.len();
        let matched = filter_emails(emails, filter, clock::now());
        debug!("Query matched {} of {} emails", matched.len(), total);
        Ok(matched)
    }

    async fn load_or_seed(&self) -> Result<Vec<Email>> {
        let emails: Vec<Email> = self.store.query(EMAIL_KEY).await?;
        if !emails.is_empty() {
            return Ok(emails);
        }

        let seed = bundled_emails()?;
        let emails = self.store.sync().seed_if_empty(EMAIL_KEY, &seed)?;
        if emails == seed {
            info!("Seeded {} with {} bundled emails", EMAIL_KEY, seed.len());
        }
        Ok(emails)
    }

    /// Fetch one email, decorated with its neighbours' ids
    ///
    /// A failure to load the collection for navigation is logged and the
    /// email is returned without links; a missing id is an error.
    pub async fn get_by_id(&self, id: &EmailId) -> Result<NavigableEmail> {
        let email: Email = self.store.get(EMAIL_KEY, id.as_str()).await?;
        Ok(self.with_navigation(email).await)
    }

    async fn with_navigation(&self, email: Email) -> NavigableEmail {
        let Some(id) = email.id.clone() else {
            return NavigableEmail::undecorated(email);
        };

        match self.store.query::<Email>(EMAIL_KEY).await {
            Ok(emails) => match neighbors(&emails, &id) {
                Some((next_email_id, prev_email_id)) => NavigableEmail {
                    email,
                    next_email_id,
                    prev_email_id,
                },
                None => NavigableEmail::undecorated(email),
            },
            Err(e) => {
                error!("Failed to load {} for navigation of {}: {:#}", EMAIL_KEY, id, e);
                NavigableEmail::undecorated(email)
            }
        }
    }

    /// Insert or update an email
    ///
    /// An email with an id replaces the stored record in place. Without an
    /// id a new sent email is created from its recipient, subject, body and
    /// draft flag, stamped with the current time and the user's address.
    pub async fn save(&self, email: Email) -> Result<Email> {
        if email.id.is_some() {
            return self.store.put(EMAIL_KEY, email).await;
        }

        let now = clock::now();
        let new_email = Email::builder()
            .created_at(now)
            .sent_at(Some(now))
            .subject(email.subject)
            .body(email.body)
            .from(self.user_email.clone())
            .to(email.to)
            .draft(email.is_draft)
            .sent(true)
            .build();

        let saved = self.store.post(EMAIL_KEY, new_email).await?;
        info!(
            "Created email {} to {}",
            saved.id.as_ref().map(EmailId::as_str).unwrap_or_default(),
            saved.to
        );
        Ok(saved)
    }

    /// Delete an email regardless of its flags
    pub async fn remove(&self, id: &EmailId) -> Result<()> {
        self.store.remove(EMAIL_KEY, id.as_str()).await?;
        info!("Removed email {}", id);
        Ok(())
    }

    /// Flip the starred flag and return the saved email
    pub async fn toggle_star(&self, id: &EmailId) -> Result<Email> {
        self.toggle_flag(id, |email| email.is_starred = !email.is_starred)
            .await
    }

    /// Flip the read flag and return the saved email
    pub async fn toggle_read(&self, id: &EmailId) -> Result<Email> {
        self.toggle_flag(id, |email| email.is_read = !email.is_read)
            .await
    }

    /// Flip the marked flag and return the saved email
    pub async fn toggle_marked(&self, id: &EmailId) -> Result<Email> {
        self.toggle_flag(id, |email| email.is_marked = !email.is_marked)
            .await
    }

    async fn toggle_flag<F>(&self, id: &EmailId, flip: F) -> Result<Email>
    where
        F: FnOnce(&mut Email) + Send,
    {
        let _guard = self.toggle_lock.lock().await;
        let mut email: Email = self.store.get(EMAIL_KEY, id.as_str()).await?;
        flip(&mut email);
        self.save(email).await
    }

    /// Move an email to trash, or delete it if it is already there
    pub async fn toggle_trash(&self, id: &EmailId) -> Result<TrashOutcome> {
        let _guard = self.toggle_lock.lock().await;
        let mut email: Email = self.store.get(EMAIL_KEY, id.as_str()).await?;

        if email.is_removed() {
            self.remove(id).await?;
            return Ok(TrashOutcome::Deleted(id.clone()));
        }

        email.removed_at = Some(clock::now());
        let saved = self.save(email).await?;
        info!("Moved email {} to trash", id);
        Ok(TrashOutcome::Trashed(saved))
    }

    /// A blank draft for the compose form; not persisted
    pub fn empty_email(&self, to: &str, subject: &str, body: &str) -> Email {
        let now = clock::now();
        Email::builder()
            .created_at(now - Duration::minutes(DRAFT_BACKDATE_MINUTES))
            .sent_at(Some(now))
            .subject(subject)
            .body(body)
            .from(self.user_email.clone())
            .to(to)
            .build()
    }

    /// Drop the mail collection; the next query reseeds it
    pub async fn reset(&self) -> Result<()> {
        self.store.sync().clear(EMAIL_KEY)?;
        info!("Cleared {}", EMAIL_KEY);
        Ok(())
    }
}
