/// Save status shown in the live status region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    Loaded,
    Saving,
    Saved,
    FixErrors,
    Reset,
    SaveFailed { err: String },
}

/// Visual weight of a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl SaveStatus {
    pub fn text(&self) -> String {
        self.text_and_tone().0
    }

    pub fn tone(&self) -> StatusTone {
        self.text_and_tone().1
    }

    pub(crate) fn text_and_tone(&self) -> (String, StatusTone) {
        match self {
            SaveStatus::Loaded => ("Loaded".into(), StatusTone::Idle),
            SaveStatus::Saving => ("Saving…".into(), StatusTone::Busy),
            SaveStatus::Saved => ("Saved ✓".into(), StatusTone::Info),
            SaveStatus::FixErrors => ("Fix errors to save".into(), StatusTone::Warning),
            SaveStatus::Reset => ("Reset ✓".into(), StatusTone::Info),
            SaveStatus::SaveFailed { err } => (format!("Save failed: {err}"), StatusTone::Error),
        }
    }
}

/// Status line rendered by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBarState {
    pub status: SaveStatus,
    pub text: String,
    pub tone: StatusTone,
}

impl StatusBarState {
    pub fn new(status: SaveStatus) -> Self {
        let (text, tone) = status.text_and_tone();
        Self { status, text, tone }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::new(SaveStatus::Loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_texts_match_live_region_copy() {
        assert_eq!(SaveStatus::Loaded.text(), "Loaded");
        assert_eq!(SaveStatus::Saving.text(), "Saving…");
        assert_eq!(SaveStatus::Saved.text(), "Saved ✓");
        assert_eq!(SaveStatus::FixErrors.text(), "Fix errors to save");
        assert_eq!(SaveStatus::Reset.text(), "Reset ✓");
    }

    #[test]
    fn save_failure_carries_error_and_error_tone() {
        let status = SaveStatus::SaveFailed {
            err: "quota exceeded".into(),
        };
        assert_eq!(status.text(), "Save failed: quota exceeded");
        assert_eq!(status.tone(), StatusTone::Error);
    }
}
