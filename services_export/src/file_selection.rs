//! One-shot destination selection exchange
//!
//! The guest asks the host to open a save dialog and waits for a single
//! `fileSelected` reply. A cancelled dialog sends nothing back, so the
//! exchange simply stays open until the next request replaces it.

use ipc::{ExportFormat, GuestMessage};

/// Tracks whether a `selectFile` request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileSelection {
    awaiting: bool,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the `selectFile` request and starts waiting for the reply
    pub fn request(&mut self, default_file_name: String, file_format: ExportFormat) -> GuestMessage {
        self.awaiting = true;
        GuestMessage::SelectFile {
            default_file_name,
            file_format,
        }
    }

    /// Consumes a `fileSelected` reply. Returns the chosen path when a
    /// request was outstanding, `None` for an unsolicited reply.
    pub fn on_selected(&mut self, file_path: &str) -> Option<String> {
        if !self.awaiting {
            tracing::debug!("ignoring unsolicited file selection");
            return None;
        }
        self.awaiting = false;
        Some(file_path.to_string())
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builds_message() {
        let mut selection = FileSelection::new();
        let message = selection.request("users.csv".into(), ExportFormat::Csv);
        assert_eq!(
            message,
            GuestMessage::SelectFile {
                default_file_name: "users.csv".into(),
                file_format: ExportFormat::Csv,
            }
        );
        assert!(selection.is_awaiting());
    }

    #[test]
    fn test_reply_completes_exchange() {
        let mut selection = FileSelection::new();
        selection.request("users.csv".into(), ExportFormat::Csv);
        assert_eq!(
            selection.on_selected("/home/me/users.csv"),
            Some("/home/me/users.csv".to_string())
        );
        assert!(!selection.is_awaiting());
        assert_eq!(selection.on_selected("/again"), None);
    }

    #[test]
    fn test_unsolicited_reply_ignored() {
        let mut selection = FileSelection::new();
        assert_eq!(selection.on_selected("/tmp/x.csv"), None);
    }
}
