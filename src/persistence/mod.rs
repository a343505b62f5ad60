//! Load/save round-trip of the settings record through a key-value store.
//!
//! Loading never fails: absent, unreadable, unparsable or wrongly shaped data
//! degrades to defaults. Saving reports errors and never retries.

mod coerce;


use thiserror::Error;

use crate::settings::Settings;
use crate::storage::{KeyValueStore, StoreError};

/// Versioned key of the persisted record. A new shape gets a new key.
pub const SETTINGS_STORAGE_KEY: &str = "settings_editor.settings.v1";

/// Errors returned when persisting the record.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads and writes the settings record under [`SETTINGS_STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct SettingsRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the stored record, repairing or replacing whatever is unusable.
    pub fn load(&self) -> Settings {
        let raw = match self.store.get(SETTINGS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored settings; using defaults");
                return Settings::default();
            }
            Err(err) => {
                tracing::warn!("Settings store unreadable, using defaults: {err}");
                return Settings::default();
            }
        };
        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("Stored settings are not valid JSON, using defaults: {err}");
                return Settings::default();
            }
        };
        coerce::settings_from_value(&value).unwrap_or_else(|| {
            tracing::warn!("Stored settings missing profile/preferences; using defaults");
            Settings::default()
        })
    }

    /// Overwrite the stored record with `settings`.
    pub fn save(&mut self, settings: &Settings) -> Result<(), SaveError> {
        let data = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_STORAGE_KEY, &data)?;
        tracing::debug!(bytes = data.len(), "Settings saved");
        Ok(())
    }
}
