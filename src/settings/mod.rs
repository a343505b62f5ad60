//! Canonical settings record edited by the controller.

mod theme;

pub use theme::Theme;

use serde::{Deserialize, Serialize};

/// The single persisted settings record.
///
/// Storage keys (JSON): `profile.displayName`, `profile.email`,
/// `preferences.theme`, `preferences.emailNotifications`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub profile: Profile,
    pub preferences: Preferences,
}

/// Identity fields shown in the profile section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Free-form name; no length or charset constraint.
    pub display_name: String,
    /// Contact address. Empty means "not provided".
    pub email: String,
}

/// Presentation and notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub email_notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            email_notifications: true,
        }
    }
}

/// Raw values read from the interface controls on a change event.
///
/// Text is forwarded untrimmed; the controller decides what to keep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFieldValues {
    pub display_name: String,
    pub email: String,
    pub theme: String,
    pub email_notifications: bool,
}

impl RawFieldValues {
    /// Raw values that would re-render the given record unchanged.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            display_name: settings.profile.display_name.clone(),
            email: settings.profile.email.clone(),
            theme: settings.preferences.theme.as_str().to_string(),
            email_notifications: settings.preferences.email_notifications,
        }
    }

    /// Build the candidate record these raw values describe.
    pub fn to_settings(&self) -> Settings {
        Settings {
            profile: Profile {
                display_name: self.display_name.clone(),
                email: self.email.trim().to_string(),
            },
            preferences: Preferences {
                theme: Theme::from_raw(&self.theme),
                email_notifications: self.email_notifications,
            },
        }
    }
}
