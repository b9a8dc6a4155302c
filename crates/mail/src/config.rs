//! Configuration loading for the mail service
//!
//! Settings are resolved in order of priority:
//! 1. Environment variables (`APPSUS_*`), per field
//! 2. JSON file in the Appsus config directory (`mail.json`)
//! 3. Built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config filename in the Appsus config directory
const CONFIG_FILE: &str = "mail.json";

/// Database filename in the Appsus data directory
const DATABASE_FILE: &str = "mail.sqlite";

const ENV_LATENCY: &str = "APPSUS_STORAGE_LATENCY_MS";
const ENV_DATABASE: &str = "APPSUS_DATABASE";
const ENV_USER_EMAIL: &str = "APPSUS_USER_EMAIL";

/// Mail service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Address of the logged-in user, used as the sender of composed mail
    pub user_email: String,
    /// Simulated latency applied to every async storage call
    pub storage_latency_ms: u64,
    /// Explicit database location; defaults to the Appsus data directory
    pub database_path: Option<PathBuf>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            user_email: "user@appsus.com".to_string(),
            storage_latency_ms: 200,
            database_path: None,
        }
    }
}

impl MailConfig {
    /// Load settings from the config file (if present) and environment
    pub fn load() -> Result<Self> {
        let base = if config::config_exists(CONFIG_FILE) {
            config::load_json(CONFIG_FILE)?
        } else {
            Self::default()
        };

        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse settings from a JSON string; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse mail config JSON")
    }

    /// Apply per-field overrides looked up by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_LATENCY) {
            self.storage_latency_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds", ENV_LATENCY))?;
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(email) = lookup(ENV_USER_EMAIL) {
            self.user_email = email;
        }
        Ok(self)
    }

    /// Settings for tests: no latency, in-memory storage
    pub fn for_tests() -> Self {
        Self {
            storage_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn storage_latency(&self) -> Duration {
        Duration::from_millis(self.storage_latency_ms)
    }

    /// Resolved database location
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database_path
            .clone()
            .or_else(|| config::data_path(DATABASE_FILE))
    }

    /// Get the default config file path (~/.config/appsus/mail.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }
}
