//! Debounced autosave: a single pending slot that fires once the edits stop.
//!
//! The scheduler never spawns anything. The event loop asks it for the next
//! deadline and calls [`AutosaveScheduler::poll`] when that deadline passes.

use std::time::{Duration, Instant};

use crate::settings::Settings;

/// Quiet interval used when the configuration does not override it.
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(350);

#[derive(Debug, Clone)]
struct PendingSave {
    record: Settings,
    due_at: Instant,
}

/// Holds at most one record waiting to be persisted.
#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    quiet_interval: Duration,
    pending: Option<PendingSave>,
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_INTERVAL)
    }
}

impl AutosaveScheduler {
    pub fn new(quiet_interval: Duration) -> Self {
        Self {
            quiet_interval,
            pending: None,
        }
    }

    pub fn quiet_interval(&self) -> Duration {
        self.quiet_interval
    }

    /// Replace any pending record and restart the quiet interval from `now`.
    pub fn schedule(&mut self, record: Settings, now: Instant) {
        if self.pending.is_some() {
            tracing::trace!("Autosave rescheduled; previous pending record dropped");
        }
        self.pending = Some(PendingSave {
            record,
            due_at: now + self.quiet_interval,
        });
    }

    /// Take the pending record if its quiet interval has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Settings> {
        if !save_due(self.next_deadline(), now) {
            return None;
        }
        self.pending.take().map(|pending| pending.record)
    }

    /// When the pending record becomes due, if one is waiting.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    /// Time left until the pending record is due; zero once overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due_at| due_at.saturating_duration_since(now))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending record without saving it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Take the pending record regardless of its deadline.
    pub fn take_pending(&mut self) -> Option<Settings> {
        self.pending.take().map(|pending| pending.record)
    }
}

fn save_due(deadline: Option<Instant>, now: Instant) -> bool {
    match deadline {
        Some(due_at) => now >= due_at,
        None => false,
    }
}
