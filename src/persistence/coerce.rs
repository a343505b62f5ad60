//! Field-by-field repair of a parsed settings blob.

use serde_json::{Map, Value};

use crate::settings::{Preferences, Profile, Settings, Theme};

/// Rebuild a full record from parsed JSON.
///
/// Returns `None` when either top-level group is missing or not an object;
/// otherwise every field falls back to its default independently.
pub(super) fn settings_from_value(value: &Value) -> Option<Settings> {
    let root = value.as_object()?;
    let profile = root.get("profile")?.as_object()?;
    let preferences = root.get("preferences")?.as_object()?;
    let defaults = Settings::default();
    Some(Settings {
        profile: Profile {
            display_name: text_field(profile, "displayName", &defaults.profile.display_name),
            email: text_field(profile, "email", &defaults.profile.email),
        },
        preferences: Preferences {
            theme: theme_field(preferences),
            email_notifications: flag_field(
                preferences,
                "emailNotifications",
                defaults.preferences.email_notifications,
            ),
        },
    })
}

fn text_field(group: &Map<String, Value>, key: &str, default: &str) -> String {
    match group.get(key) {
        Some(Value::String(text)) => text.clone(),
        _ => default.to_string(),
    }
}

fn theme_field(group: &Map<String, Value>) -> Theme {
    match group.get("theme") {
        Some(Value::String(raw)) => Theme::from_raw(raw),
        _ => Theme::Light,
    }
}

fn flag_field(group: &Map<String, Value>, key: &str, default: bool) -> bool {
    match group.get(key) {
        None | Some(Value::Null) => default,
        Some(value) => truthy(value),
    }
}

/// Loose truthiness for values written by older or foreign writers.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
