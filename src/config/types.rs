use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::autosave::DEFAULT_QUIET_INTERVAL;
use crate::validation::{EmailValidator, is_well_formed_domain};

pub(super) const MIN_QUIET_INTERVAL_MS: u64 = 50;
pub(super) const MAX_QUIET_INTERVAL_MS: u64 = 10_000;

fn default_quiet_interval_ms() -> u64 {
    DEFAULT_QUIET_INTERVAL.as_millis() as u64
}

/// Editor configuration loaded from `config.toml`.
///
/// Config tables: `autosave`, `storage`, `validation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub autosave: AutosaveSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
}

impl EditorConfig {
    pub(crate) fn normalized(mut self) -> Self {
        self.autosave.quiet_interval_ms = self
            .autosave
            .quiet_interval_ms
            .clamp(MIN_QUIET_INTERVAL_MS, MAX_QUIET_INTERVAL_MS);
        let mut domains: Vec<String> = Vec::new();
        for domain in self.validation.extra_allowed_domains {
            let domain = domain.trim().to_ascii_lowercase();
            if !is_well_formed_domain(&domain) {
                tracing::warn!("Ignoring malformed allow-list domain {domain:?}");
                continue;
            }
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        self.validation.extra_allowed_domains = domains;
        self
    }

    pub fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.autosave.quiet_interval_ms)
    }

    pub fn email_validator(&self) -> EmailValidator {
        EmailValidator::with_extra_domains(&self.validation.extra_allowed_domains)
    }
}

/// Debounce timing for autosave.
///
/// Config keys: `quiet_interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveSettings {
    #[serde(default = "default_quiet_interval_ms")]
    pub quiet_interval_ms: u64,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            quiet_interval_ms: default_quiet_interval_ms(),
        }
    }
}

/// Where the settings record is persisted.
///
/// Config keys: `backend`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Durable store implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `settings.db` under the app root.
    #[default]
    Sqlite,
    /// One JSON file per key under `<app root>/store`.
    File,
}

/// Extensions to the email domain allow-list.
///
/// Config keys: `extra_allowed_domains`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    #[serde(default)]
    pub extra_allowed_domains: Vec<String>,
}
