//! Settings controller: owns the record and drives validation, autosave and status.

mod state;
mod status;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use crate::autosave::AutosaveScheduler;
use crate::config::EditorConfig;
use crate::persistence::{SaveError, SettingsRepository};
use crate::settings::{RawFieldValues, Settings, Theme};
use crate::storage::KeyValueStore;
use crate::validation::{EmailValidator, ValidationVerdict};

pub use state::SettingsUiState;
pub use status::{SaveStatus, StatusBarState, StatusTone};

type ThemeHook = Box<dyn FnMut(Theme)>;

/// Maintains the settings record and bridges it to the presentation layer.
///
/// Single-threaded: the embedding event loop delivers edits in order and calls
/// [`SettingsController::tick`] to let a due autosave run.
pub struct SettingsController<S> {
    ui: SettingsUiState,
    settings: Settings,
    repository: SettingsRepository<S>,
    scheduler: AutosaveScheduler,
    validator: EmailValidator,
    theme_hook: Option<ThemeHook>,
}

impl<S: KeyValueStore> SettingsController<S> {
    pub fn new(store: S) -> Self {
        Self {
            ui: SettingsUiState::default(),
            settings: Settings::default(),
            repository: SettingsRepository::new(store),
            scheduler: AutosaveScheduler::default(),
            validator: EmailValidator::default(),
            theme_hook: None,
        }
    }

    /// Controller using the configured quiet interval and domain allow-list.
    pub fn with_config(store: S, config: &EditorConfig) -> Self {
        Self::new(store)
            .with_quiet_interval(config.quiet_interval())
            .with_validator(config.email_validator())
    }

    pub fn with_quiet_interval(mut self, quiet_interval: Duration) -> Self {
        self.scheduler = AutosaveScheduler::new(quiet_interval);
        self
    }

    pub fn with_validator(mut self, validator: EmailValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Callback invoked synchronously whenever the theme attribute is applied.
    pub fn with_theme_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Theme) + 'static,
    {
        self.theme_hook = Some(Box::new(hook));
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ui(&self) -> &SettingsUiState {
        &self.ui
    }

    pub fn status(&self) -> &SaveStatus {
        &self.ui.status.status
    }

    pub fn status_text(&self) -> &str {
        &self.ui.status.text
    }

    pub fn email_error(&self) -> Option<&str> {
        self.ui.email_error.as_deref()
    }

    pub fn applied_theme(&self) -> Theme {
        self.ui.theme
    }

    pub fn repository(&self) -> &SettingsRepository<S> {
        &self.repository
    }

    /// Deadline of the pending autosave, for the event loop to wait on.
    pub fn next_autosave_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn has_pending_save(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Consume the full re-render request raised by initialize or reset.
    pub fn take_full_render(&mut self) -> bool {
        std::mem::take(&mut self.ui.needs_full_render)
    }

    /// Load the stored record and populate the initial interface state.
    pub fn initialize(&mut self) {
        self.settings = self.repository.load();
        self.scheduler.cancel();
        self.ui.email_error = None;
        self.apply_theme();
        self.set_status(SaveStatus::Loaded);
        self.ui.needs_full_render = true;
        tracing::info!(theme = %self.settings.preferences.theme, "Settings loaded");
    }

    /// Apply a field edit at the current instant.
    pub fn apply_edit(&mut self, raw: &RawFieldValues) -> ValidationVerdict {
        self.apply_edit_at(raw, Instant::now())
    }

    /// Apply a field edit as if it happened at `now`.
    ///
    /// The candidate always becomes the in-memory record; only a valid one is
    /// handed to the autosave scheduler.
    pub fn apply_edit_at(&mut self, raw: &RawFieldValues, now: Instant) -> ValidationVerdict {
        let candidate = raw.to_settings();
        let verdict = self.validator.validate(&candidate.profile.email);
        self.settings = candidate;
        self.apply_theme();
        match &verdict {
            ValidationVerdict::Invalid(message) => {
                tracing::debug!("Edit rejected: {message}");
                self.ui.email_error = Some(message.clone());
                self.set_status(SaveStatus::FixErrors);
            }
            ValidationVerdict::Valid => {
                self.ui.email_error = None;
                self.set_status(SaveStatus::Saving);
                self.scheduler.schedule(self.settings.clone(), now);
                tracing::debug!("Autosave scheduled");
            }
        }
        verdict
    }

    /// Run a due autosave at the current instant.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Run the pending autosave if its quiet interval has elapsed by `now`.
    ///
    /// Returns whether a save was attempted.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(record) = self.scheduler.poll(now) else {
            return false;
        };
        self.persist_pending(&record);
        true
    }

    /// Persist a pending autosave immediately, ignoring the quiet interval.
    pub fn flush(&mut self) -> bool {
        let Some(record) = self.scheduler.take_pending() else {
            return false;
        };
        self.persist_pending(&record);
        true
    }

    /// Restore defaults and persist them immediately.
    pub fn reset(&mut self) {
        if self.scheduler.cancel() {
            tracing::debug!("Pending autosave dropped by reset");
        }
        self.settings = Settings::default();
        self.ui.email_error = None;
        self.apply_theme();
        match self.repository.save(&self.settings) {
            Ok(()) => {
                tracing::info!("Settings reset to defaults");
                self.set_status(SaveStatus::Reset);
            }
            Err(err) => self.report_save_failure(err),
        }
        self.ui.needs_full_render = true;
    }

    fn persist_pending(&mut self, record: &Settings) {
        match self.repository.save(record) {
            Ok(()) => {
                // A rejected edit made after this record was scheduled still needs fixing.
                if self.ui.email_error.is_none() {
                    self.set_status(SaveStatus::Saved);
                }
            }
            Err(err) => self.report_save_failure(err),
        }
    }

    fn report_save_failure(&mut self, err: SaveError) {
        tracing::warn!("Settings save failed: {err}");
        self.set_status(SaveStatus::SaveFailed {
            err: err.to_string(),
        });
    }

    fn apply_theme(&mut self) {
        let theme = self.settings.preferences.theme;
        self.ui.theme = theme;
        if let Some(hook) = self.theme_hook.as_mut() {
            hook(theme);
        }
    }

    fn set_status(&mut self, status: SaveStatus) {
        self.ui.status = StatusBarState::new(status);
    }
}
