use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::*;
use crate::autosave::DEFAULT_QUIET_INTERVAL;
use crate::persistence::SETTINGS_STORAGE_KEY;
use crate::settings::Settings;
use crate::storage::MemoryStore;
use crate::validation::{DOMAIN_NOT_ALLOWED_MESSAGE, INVALID_FORMAT_MESSAGE};

fn stored(store: &MemoryStore) -> Option<Settings> {
    store
        .raw(SETTINGS_STORAGE_KEY)
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

fn edit(name: &str, email: &str, theme: &str, notifications: bool) -> RawFieldValues {
    RawFieldValues {
        display_name: name.into(),
        email: email.into(),
        theme: theme.into(),
        email_notifications: notifications,
    }
}

fn initialized(store: &MemoryStore) -> SettingsController<MemoryStore> {
    let mut controller = SettingsController::new(store.clone());
    controller.initialize();
    controller
}

#[test]
fn initialize_loads_stored_record_and_applies_theme() {
    let store = MemoryStore::with_value(
        SETTINGS_STORAGE_KEY,
        r#"{"profile":{"displayName":"Lin","email":""},"preferences":{"theme":"dark","emailNotifications":false}}"#,
    );
    let mut controller = initialized(&store);
    assert_eq!(controller.settings().profile.display_name, "Lin");
    assert_eq!(controller.applied_theme(), Theme::Dark);
    assert_eq!(controller.status(), &SaveStatus::Loaded);
    assert_eq!(controller.status_text(), "Loaded");
    assert!(controller.take_full_render());
    assert!(!controller.take_full_render());
}

#[test]
fn initialize_with_corrupt_store_uses_defaults() {
    let store = MemoryStore::with_value(SETTINGS_STORAGE_KEY, "{{{");
    let controller = initialized(&store);
    assert_eq!(controller.settings(), &Settings::default());
    assert_eq!(controller.applied_theme(), Theme::Light);
}

#[test]
fn valid_edit_saves_once_after_quiet_interval() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    let start = Instant::now();

    let verdict = controller.apply_edit_at(&edit("Ada", "ada@gmail.com", "light", true), start);
    assert!(verdict.is_valid());
    assert_eq!(controller.status_text(), "Saving…");
    assert!(controller.has_pending_save());

    assert!(!controller.tick_at(start + Duration::from_millis(100)));
    assert_eq!(store.write_count(), 0);

    assert!(controller.tick_at(start + DEFAULT_QUIET_INTERVAL));
    assert_eq!(store.write_count(), 1);
    assert_eq!(controller.status_text(), "Saved ✓");
    assert_eq!(stored(&store).unwrap().profile.display_name, "Ada");

    assert!(!controller.tick_at(start + Duration::from_secs(10)));
    assert_eq!(store.write_count(), 1);
}

#[test]
fn burst_of_edits_persists_only_the_last() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    let start = Instant::now();
    let step = Duration::from_millis(100);

    controller.apply_edit_at(&edit("E1", "", "light", true), start);
    controller.tick_at(start + step);
    controller.apply_edit_at(&edit("E2", "", "dark", true), start + step);
    controller.tick_at(start + step * 2);
    controller.apply_edit_at(&edit("E3", "", "dark", false), start + step * 2);

    controller.tick_at(start + step * 2 + DEFAULT_QUIET_INTERVAL);
    assert_eq!(store.write_count(), 1);
    let saved = stored(&store).unwrap();
    assert_eq!(saved.profile.display_name, "E3");
    assert!(!saved.preferences.email_notifications);
}

#[test]
fn theme_applies_before_autosave_fires() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let hook_seen = seen.clone();
    let store = MemoryStore::new();
    let mut controller = SettingsController::new(store.clone())
        .with_theme_hook(move |theme| hook_seen.borrow_mut().push(theme));
    controller.initialize();

    controller.apply_edit_at(&edit("", "", "dark", true), Instant::now());
    assert_eq!(controller.applied_theme(), Theme::Dark);
    assert_eq!(seen.borrow().last(), Some(&Theme::Dark));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn invalid_email_updates_record_but_not_store() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    let start = Instant::now();
    controller.apply_edit_at(&edit("Valid", "v@gmail.com", "light", true), start);
    controller.tick_at(start + DEFAULT_QUIET_INTERVAL);
    let last_valid = stored(&store).unwrap();

    let later = start + Duration::from_secs(1);
    let verdict = controller.apply_edit_at(&edit("Renamed", "nope", "dark", false), later);
    assert_eq!(verdict, ValidationVerdict::Invalid(INVALID_FORMAT_MESSAGE.into()));
    assert_eq!(controller.email_error(), Some(INVALID_FORMAT_MESSAGE));
    assert_eq!(controller.status_text(), "Fix errors to save");
    assert_eq!(controller.settings().profile.display_name, "Renamed");
    assert_eq!(controller.settings().preferences.theme, Theme::Dark);
    assert!(!controller.settings().preferences.email_notifications);
    assert_eq!(controller.applied_theme(), Theme::Dark);

    assert!(!controller.tick_at(later + Duration::from_secs(10)));
    assert_eq!(stored(&store).unwrap(), last_valid);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn correcting_the_email_resumes_saving() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    let start = Instant::now();
    controller.apply_edit_at(&edit("", "x@unknown-domain.xyz", "light", true), start);
    assert_eq!(controller.email_error(), Some(DOMAIN_NOT_ALLOWED_MESSAGE));
    assert_eq!(controller.status(), &SaveStatus::FixErrors);

    controller.apply_edit_at(&edit("", "x@outlook.com", "light", true), start);
    assert_eq!(controller.email_error(), None);
    assert_eq!(controller.status(), &SaveStatus::Saving);
    controller.tick_at(start + DEFAULT_QUIET_INTERVAL);
    assert_eq!(controller.status(), &SaveStatus::Saved);
    assert_eq!(stored(&store).unwrap().profile.email, "x@outlook.com");
}

#[test]
fn pending_valid_save_still_lands_after_a_rejected_edit() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    let start = Instant::now();
    controller.apply_edit_at(&edit("Kept", "", "light", true), start);
    controller.apply_edit_at(&edit("Kept", "bad@", "light", true), start + Duration::from_millis(50));

    assert!(controller.tick_at(start + DEFAULT_QUIET_INTERVAL));
    assert_eq!(stored(&store).unwrap().profile.display_name, "Kept");
    assert_eq!(stored(&store).unwrap().profile.email, "");
    assert_eq!(controller.status(), &SaveStatus::FixErrors);
}

#[test]
fn reset_persists_defaults_immediately_and_drops_pending_save() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    let start = Instant::now();
    controller.apply_edit_at(&edit("Gone", "g@gmail.com", "dark", false), start);
    controller.apply_edit_at(&edit("Gone", "bad", "dark", false), start);
    controller.take_full_render();

    controller.reset();
    assert_eq!(stored(&store), Some(Settings::default()));
    assert_eq!(controller.status_text(), "Reset ✓");
    assert_eq!(controller.settings(), &Settings::default());
    assert_eq!(controller.email_error(), None);
    assert_eq!(controller.applied_theme(), Theme::Light);
    assert!(controller.take_full_render());

    assert!(!controller.tick_at(start + Duration::from_secs(5)));
    assert_eq!(stored(&store), Some(Settings::default()));
    assert_eq!(store.write_count(), 1);
}

#[test]
fn write_failure_is_surfaced_instead_of_saved() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    store.fail_writes(true);
    let start = Instant::now();
    controller.apply_edit_at(&edit("Ada", "", "light", true), start);
    controller.tick_at(start + DEFAULT_QUIET_INTERVAL);
    assert!(matches!(controller.status(), SaveStatus::SaveFailed { .. }));
    assert!(controller.status_text().starts_with("Save failed:"));
    assert_eq!(controller.ui().status.tone, StatusTone::Error);

    controller.reset();
    assert!(matches!(controller.status(), SaveStatus::SaveFailed { .. }));
    assert_eq!(stored(&store), None);
}

#[test]
fn flush_writes_pending_record_without_waiting() {
    let store = MemoryStore::new();
    let mut controller = initialized(&store);
    assert!(!controller.flush());
    controller.apply_edit_at(&edit("Now", "", "light", true), Instant::now());
    assert!(controller.flush());
    assert_eq!(stored(&store).unwrap().profile.display_name, "Now");
    assert_eq!(controller.status(), &SaveStatus::Saved);
    assert!(!controller.has_pending_save());
}

#[test]
fn configured_interval_and_domains_are_used() {
    let mut config = EditorConfig::default();
    config.autosave.quiet_interval_ms = 1_000;
    config.validation.extra_allowed_domains = vec!["corp.example".into()];
    let store = MemoryStore::new();
    let mut controller = SettingsController::with_config(store.clone(), &config);
    controller.initialize();

    let start = Instant::now();
    assert!(controller
        .apply_edit_at(&edit("", "me@corp.example", "light", true), start)
        .is_valid());
    assert_eq!(
        controller.next_autosave_deadline(),
        Some(start + Duration::from_secs(1))
    );
    assert!(!controller.tick_at(start + DEFAULT_QUIET_INTERVAL));
    assert!(controller.tick_at(start + Duration::from_secs(1)));
}
