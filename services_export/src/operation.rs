//! Export operation state machine
//!
//! Tracks the single export a panel may have in flight. Host messages are
//! correlated only by command tag and current phase; there are no request
//! ids, so a second submit is refused until the first run ends.

use crate::error::SubmitError;
use ipc::HostMessage;
use std::fmt;

/// Lifecycle phase of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    InProgress,
    Completed,
    Failed,
}

impl Phase {
    /// Whether an export is waiting for the host
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Phase::Submitting | Phase::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Submitting => "submitting",
            Phase::InProgress => "inProgress",
            Phase::Completed => "completed",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guest-side view of the current export
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationState {
    phase: Phase,
    /// Progress (0-100), never decreasing within a run
    progress_percent: u8,
    progress_text: String,
    error_message: Option<String>,
    result_path: Option<String>,
}

impl OperationState {
    /// Creates an idle state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    pub fn progress_text(&self) -> &str {
        &self.progress_text
    }

    /// Host error text, only set in [`Phase::Failed`]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Written file, only set in [`Phase::Completed`]
    pub fn result_path(&self) -> Option<&str> {
        self.result_path.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase.is_in_flight()
    }

    /// Starts a fresh run in [`Phase::Submitting`].
    ///
    /// The caller has already validated the form.
    pub fn begin_submit(&mut self) -> Result<(), SubmitError> {
        if self.is_in_flight() {
            return Err(SubmitError::InFlight);
        }
        *self = Self::default();
        self.transition(Phase::Submitting);
        Ok(())
    }

    /// The `export` message left the guest
    pub fn mark_sent(&mut self) {
        if self.phase == Phase::Submitting {
            self.progress_percent = 0;
            self.transition(Phase::InProgress);
        }
    }

    /// Applies a host message. Returns false when the message is ignored in
    /// the current phase (or is not an export message at all).
    pub fn apply(&mut self, message: &HostMessage) -> bool {
        if !self.is_in_flight() {
            tracing::debug!(
                phase = %self.phase,
                command = %message.command(),
                "ignoring host message outside an export"
            );
            return false;
        }

        match message {
            HostMessage::ExportProgress { progress, text } => {
                let clamped = (*progress).min(100) as u8;
                self.progress_percent = self.progress_percent.max(clamped);
                self.progress_text.clone_from(text);
                if self.phase == Phase::Submitting {
                    self.transition(Phase::InProgress);
                }
                tracing::debug!(progress = self.progress_percent, "export progress");
                true
            }
            HostMessage::ExportComplete { file_path } => {
                self.progress_percent = 100;
                self.result_path = Some(file_path.clone());
                self.transition(Phase::Completed);
                true
            }
            HostMessage::Error { error } => {
                self.progress_percent = 0;
                self.progress_text.clear();
                self.error_message = Some(error.clone());
                self.transition(Phase::Failed);
                true
            }
            HostMessage::FileSelected { .. } => false,
        }
    }

    fn transition(&mut self, to: Phase) {
        tracing::info!(from = %self.phase, to = %to, "export phase changed");
        self.phase = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(progress: u32, text: &str) -> HostMessage {
        HostMessage::ExportProgress {
            progress,
            text: text.to_string(),
        }
    }

    fn submitting() -> OperationState {
        let mut state = OperationState::new();
        state.begin_submit().unwrap();
        state
    }

    #[test]
    fn test_starts_idle() {
        let state = OperationState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.progress_percent(), 0);
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_progress_then_complete() {
        let mut state = submitting();
        assert_eq!(state.phase(), Phase::Submitting);

        assert!(state.apply(&progress(42, "42 rows")));
        assert_eq!(state.phase(), Phase::InProgress);
        assert_eq!(state.progress_percent(), 42);
        assert_eq!(state.progress_text(), "42 rows");

        assert!(state.apply(&HostMessage::ExportComplete {
            file_path: "/tmp/x.csv".into()
        }));
        assert_eq!(state.phase(), Phase::Completed);
        assert_eq!(state.progress_percent(), 100);
        assert_eq!(state.result_path(), Some("/tmp/x.csv"));
    }

    #[test]
    fn test_mark_sent_enters_in_progress() {
        let mut state = submitting();
        state.mark_sent();
        assert_eq!(state.phase(), Phase::InProgress);
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn test_progress_is_monotonic_and_clamped() {
        let mut state = submitting();
        state.apply(&progress(60, "a"));
        state.apply(&progress(30, "b"));
        assert_eq!(state.progress_percent(), 60);
        assert_eq!(state.progress_text(), "b");

        state.apply(&progress(250, "c"));
        assert_eq!(state.progress_percent(), 100);
    }

    #[test]
    fn test_error_resets_progress() {
        let mut state = submitting();
        state.apply(&progress(80, "80 rows"));
        state.apply(&HostMessage::Error {
            error: "ORA-00942: table or view does not exist".into(),
        });

        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.progress_percent(), 0);
        assert_eq!(state.progress_text(), "");
        assert_eq!(
            state.error_message(),
            Some("ORA-00942: table or view does not exist")
        );
        assert_eq!(state.result_path(), None);
    }

    #[test]
    fn test_messages_ignored_when_not_in_flight() {
        let mut state = OperationState::new();
        assert!(!state.apply(&progress(10, "x")));
        assert!(!state.apply(&HostMessage::Error { error: "late".into() }));
        assert_eq!(state, OperationState::new());

        let mut done = submitting();
        done.apply(&HostMessage::ExportComplete {
            file_path: "/tmp/a".into(),
        });
        assert!(!done.apply(&progress(5, "stale")));
        assert_eq!(done.phase(), Phase::Completed);
        assert_eq!(done.progress_percent(), 100);
    }

    #[test]
    fn test_submit_rejected_in_flight() {
        let mut state = submitting();
        assert_eq!(state.begin_submit(), Err(SubmitError::InFlight));
        state.mark_sent();
        assert_eq!(state.begin_submit(), Err(SubmitError::InFlight));
    }

    #[test]
    fn test_resubmit_after_terminal_resets() {
        let mut state = submitting();
        state.apply(&progress(70, "70 rows"));
        state.apply(&HostMessage::Error { error: "boom".into() });

        state.begin_submit().unwrap();
        assert_eq!(state.phase(), Phase::Submitting);
        assert_eq!(state.progress_percent(), 0);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_file_selected_is_not_an_export_message() {
        let mut state = submitting();
        assert!(!state.apply(&HostMessage::FileSelected {
            file_path: "/tmp/a".into()
        }));
        assert_eq!(state.phase(), Phase::Submitting);
    }
}
