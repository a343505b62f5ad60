use crate::settings::Theme;

use super::status::StatusBarState;

/// Everything the presentation layer renders besides the record itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsUiState {
    /// Live status region.
    pub status: StatusBarState,
    /// Inline message next to the email field, if the last edit was rejected.
    pub email_error: Option<String>,
    /// Theme attribute currently applied to the interface.
    pub theme: Theme,
    /// Set when every field must be re-populated from the record.
    pub needs_full_render: bool,
}
