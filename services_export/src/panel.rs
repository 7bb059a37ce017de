//! Export panel: form, operation state and channel wiring

use crate::config::{ExportDefaults, PanelParams};
use crate::draft::ExportDraft;
use crate::error::SubmitError;
use crate::file_path::{change_file_extension, default_file_name};
use crate::file_selection::FileSelection;
use crate::operation::{OperationState, Phase};
use ipc::{
    decode_host, Channel, Dispatch, ExportFormat, ExportKind, GuestMessage, HostCommand, HostLink,
    HostMessage, Router,
};

/// State mutated by host message handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub draft: ExportDraft,
    pub operation: OperationState,
    pub file_selection: FileSelection,
    /// Message of the last failed validation, cleared by a successful submit
    pub validation_message: Option<String>,
}

/// Guest side of one export panel.
///
/// The panel owns its channel and handler registrations. Dropping or
/// [`close`](ExportPanel::close)-ing it ends every registration.
pub struct ExportPanel<L: HostLink> {
    channel: Channel<L>,
    router: Router<PanelState>,
    state: PanelState,
}

impl<L: HostLink> ExportPanel<L> {
    /// Creates a panel for `params` and registers its message handlers
    pub fn new(params: PanelParams, defaults: ExportDefaults, link: L) -> Self {
        let mut router: Router<PanelState> = Router::new();
        router.on(HostCommand::FileSelected, |state: &mut PanelState, message| {
            if let HostMessage::FileSelected { file_path } = message {
                if let Some(path) = state.file_selection.on_selected(file_path) {
                    state.draft.destination = path;
                }
            }
        });
        for command in [
            HostCommand::ExportProgress,
            HostCommand::ExportComplete,
            HostCommand::Error,
        ] {
            router.on(command, |state: &mut PanelState, message| {
                state.operation.apply(message);
            });
        }

        let channel = Channel::new(link);
        tracing::debug!(
            channel = %channel.id(),
            schema = %params.schema,
            table = %params.table_name,
            "export panel opened"
        );

        Self {
            channel,
            router,
            state: PanelState {
                draft: ExportDraft::new(&params, &defaults),
                operation: OperationState::new(),
                file_selection: FileSelection::new(),
                validation_message: None,
            },
        }
    }

    // Form

    pub fn set_kind(&mut self, kind: ExportKind) {
        self.state.draft.kind = kind;
    }

    /// Changes the format and rewrites the extension of an already chosen
    /// destination to match
    pub fn set_format(&mut self, format: ExportFormat) {
        let draft = &mut self.state.draft;
        draft.format = format;
        if !draft.destination.trim().is_empty() {
            draft.destination = change_file_extension(&draft.destination, format.extension());
        }
    }

    /// Direct access to the remaining form fields
    pub fn draft_mut(&mut self) -> &mut ExportDraft {
        &mut self.state.draft
    }

    /// Asks the host for a destination file
    pub fn choose_destination(&mut self) {
        let draft = &self.state.draft;
        let name = default_file_name(draft.kind, &draft.table, draft.format);
        let message = self.state.file_selection.request(name, draft.format);
        self.channel.send(&message);
    }

    // Operation

    /// Validates the form and starts an export.
    ///
    /// On success exactly one `export` message has been sent. On failure
    /// nothing is sent and, for validation failures, the message is kept
    /// in [`validation_message`](Self::validation_message).
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if self.state.operation.is_in_flight() {
            tracing::debug!(channel = %self.channel.id(), "submit refused while in flight");
            return Err(SubmitError::InFlight);
        }

        let options = match self.state.draft.to_request() {
            Ok(options) => options,
            Err(err) => {
                self.state.validation_message = Some(err.to_string());
                return Err(err.into());
            }
        };
        self.state.validation_message = None;

        self.state.operation.begin_submit()?;
        self.channel.send(&GuestMessage::Export { options });
        self.state.operation.mark_sent();
        Ok(())
    }

    // Inbound

    /// Decodes and delivers a raw host frame. Frames that fail to decode are
    /// logged and dropped.
    pub fn receive(&mut self, frame: &str) -> Dispatch {
        match decode_host(frame) {
            Ok(Some(message)) => self.deliver(&message),
            Ok(None) => {
                tracing::debug!(channel = %self.channel.id(), "ignoring unknown host command");
                Dispatch::Ignored
            }
            Err(err) => {
                tracing::warn!(channel = %self.channel.id(), error = %err, "dropping malformed host frame");
                Dispatch::Ignored
            }
        }
    }

    /// Delivers a decoded host message to its handler
    pub fn deliver(&mut self, message: &HostMessage) -> Dispatch {
        self.router.dispatch(&mut self.state, message)
    }

    /// Deregisters every handler; later deliveries are ignored
    pub fn close(&mut self) {
        self.router.clear();
        tracing::debug!(channel = %self.channel.id(), "export panel closed");
    }

    // Accessors

    pub fn phase(&self) -> Phase {
        self.state.operation.phase()
    }

    pub fn state(&self) -> &OperationState {
        &self.state.operation
    }

    pub fn draft(&self) -> &ExportDraft {
        &self.state.draft
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.state.validation_message.as_deref()
    }

    /// The submit control is disabled while an export is in flight
    pub fn submit_enabled(&self) -> bool {
        !self.state.operation.is_in_flight()
    }

    pub fn is_awaiting_file(&self) -> bool {
        self.state.file_selection.is_awaiting()
    }

    pub fn is_closed(&self) -> bool {
        self.router.is_empty()
    }

    pub fn channel(&self) -> &Channel<L> {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut Channel<L> {
        &mut self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipc::MemoryLink;

    fn panel() -> ExportPanel<MemoryLink> {
        ExportPanel::new(
            PanelParams::new("public", "users"),
            ExportDefaults::default(),
            MemoryLink::new(),
        )
    }

    #[test]
    fn test_new_panel_is_idle() {
        let panel = panel();
        assert_eq!(panel.phase(), Phase::Idle);
        assert!(panel.submit_enabled());
        assert_eq!(panel.validation_message(), None);
        assert!(!panel.is_closed());
    }

    #[test]
    fn test_set_format_rewrites_destination() {
        let mut panel = panel();
        panel.set_format(ExportFormat::Json);
        assert_eq!(panel.draft().destination, "");

        panel.draft_mut().destination = "/tmp/users.json".into();
        panel.set_format(ExportFormat::Sql);
        assert_eq!(panel.draft().destination, "/tmp/users.sql");
    }

    #[test]
    fn test_submit_without_destination() {
        let mut panel = panel();
        let result = panel.submit();
        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(panel.phase(), Phase::Idle);
        assert_eq!(
            panel.validation_message(),
            Some("Please select a destination file")
        );
        assert_eq!(panel.channel().link().sent_len(), 0);
    }

    #[test]
    fn test_submit_sends_once() {
        let mut panel = panel();
        panel.draft_mut().destination = "/tmp/users.csv".into();
        panel.submit().unwrap();

        assert_eq!(panel.phase(), Phase::InProgress);
        assert!(!panel.submit_enabled());
        assert_eq!(panel.submit(), Err(SubmitError::InFlight));
        assert_eq!(panel.channel().link().sent_len(), 1);
    }

    #[test]
    fn test_close_ignores_later_messages() {
        let mut panel = panel();
        panel.draft_mut().destination = "/tmp/users.csv".into();
        panel.submit().unwrap();
        panel.close();

        let dispatch = panel.deliver(&HostMessage::ExportComplete {
            file_path: "/tmp/users.csv".into(),
        });
        assert_eq!(dispatch, Dispatch::Ignored);
        assert_eq!(panel.phase(), Phase::InProgress);
        assert!(panel.is_closed());
    }
}
