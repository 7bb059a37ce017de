//! Message catalog and frame codec

use crate::export::{ExportFormat, ExportOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discriminant of a guest → host message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestCommand {
    SelectFile,
    Export,
    ExecuteQuery,
}

impl GuestCommand {
    /// Returns the wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestCommand::SelectFile => "selectFile",
            GuestCommand::Export => "export",
            GuestCommand::ExecuteQuery => "executeQuery",
        }
    }
}

impl fmt::Display for GuestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a host → guest message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostCommand {
    FileSelected,
    ExportProgress,
    ExportComplete,
    Error,
}

impl HostCommand {
    /// Every host command, in catalog order
    pub const ALL: [HostCommand; 4] = [
        HostCommand::FileSelected,
        HostCommand::ExportProgress,
        HostCommand::ExportComplete,
        HostCommand::Error,
    ];

    /// Returns the wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            HostCommand::FileSelected => "fileSelected",
            HostCommand::ExportProgress => "exportProgress",
            HostCommand::ExportComplete => "exportComplete",
            HostCommand::Error => "error",
        }
    }

    /// Maps a wire tag back to a command, `None` for tags outside the catalog
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.as_str() == tag)
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages sent by the guest to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GuestMessage {
    /// Ask the host to show a save dialog
    SelectFile {
        default_file_name: String,
        file_format: ExportFormat,
    },
    /// Start an export
    Export { options: ExportOptions },
    /// Run a query in the host's query runner
    ExecuteQuery { query: String },
}

impl GuestMessage {
    pub fn command(&self) -> GuestCommand {
        match self {
            GuestMessage::SelectFile { .. } => GuestCommand::SelectFile,
            GuestMessage::Export { .. } => GuestCommand::Export,
            GuestMessage::ExecuteQuery { .. } => GuestCommand::ExecuteQuery,
        }
    }
}

/// Messages sent by the host to the guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostMessage {
    /// The user picked a destination in the host's save dialog
    FileSelected { file_path: String },
    /// Progress of the running export, `progress` in percent
    ExportProgress {
        progress: u32,
        #[serde(default)]
        text: String,
    },
    /// The export finished and was written to `file_path`
    ExportComplete { file_path: String },
    /// The host failed; `error` is shown verbatim
    Error { error: String },
}

impl HostMessage {
    pub fn command(&self) -> HostCommand {
        match self {
            HostMessage::FileSelected { .. } => HostCommand::FileSelected,
            HostMessage::ExportProgress { .. } => HostCommand::ExportProgress,
            HostMessage::ExportComplete { .. } => HostCommand::ExportComplete,
            HostMessage::Error { .. } => HostCommand::Error,
        }
    }
}

/// Error decoding an inbound frame
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame has no string `command` field")]
    MissingCommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("malformed `{command}` frame: {source}")]
    Malformed {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Encodes a guest message as a JSON frame
pub fn encode_guest(message: &GuestMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}

/// Encodes a host message as a JSON frame
pub fn encode_host(message: &HostMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(message)
}

/// Decodes a host frame.
///
/// Returns `Ok(None)` when the `command` tag is not part of the host catalog;
/// such frames are ignored rather than treated as errors.
pub fn decode_host(frame: &str) -> Result<Option<HostMessage>, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(frame)?;
    let tag = value
        .get("command")
        .and_then(serde_json::Value::as_str)
        .ok_or(DecodeError::MissingCommand)?;

    let Some(command) = HostCommand::parse(tag) else {
        return Ok(None);
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|source| DecodeError::Malformed {
            command: command.as_str(),
            source,
        })
}

/// Decodes a guest frame (used by hosts and test doubles)
pub fn decode_guest(frame: &str) -> Result<GuestMessage, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(frame)?;
    let tag = value
        .get("command")
        .and_then(serde_json::Value::as_str)
        .ok_or(DecodeError::MissingCommand)?;
    let command = match tag {
        "selectFile" => GuestCommand::SelectFile,
        "export" => GuestCommand::Export,
        "executeQuery" => GuestCommand::ExecuteQuery,
        other => return Err(DecodeError::UnknownCommand(other.to_string())),
    };

    serde_json::from_value(value).map_err(|source| DecodeError::Malformed {
        command: command.as_str(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_command_parse() {
        for command in HostCommand::ALL {
            assert_eq!(HostCommand::parse(command.as_str()), Some(command));
        }
        assert_eq!(HostCommand::parse("refresh"), None);
    }

    #[test]
    fn test_decode_progress() {
        let decoded = decode_host(r#"{"command":"exportProgress","progress":42,"text":"42 rows"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            decoded,
            HostMessage::ExportProgress {
                progress: 42,
                text: "42 rows".to_string()
            }
        );
        assert_eq!(decoded.command(), HostCommand::ExportProgress);
    }

    #[test]
    fn test_decode_progress_without_text() {
        let decoded = decode_host(r#"{"command":"exportProgress","progress":7}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            decoded,
            HostMessage::ExportProgress {
                progress: 7,
                text: String::new()
            }
        );
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let decoded = decode_host(r#"{"command":"themeChanged","dark":true}"#).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_missing_command_is_error() {
        let err = decode_host(r#"{"filePath":"/tmp/x.csv"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingCommand));

        let err = decode_host(r#"{"command":3}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingCommand));
    }

    #[test]
    fn test_malformed_known_command() {
        let err = decode_host(r#"{"command":"exportComplete"}"#).unwrap_err();
        match err {
            DecodeError::Malformed { command, .. } => assert_eq!(command, "exportComplete"),
            other => panic!("Expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_host("not json").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_encode_execute_query() {
        let frame = encode_guest(&GuestMessage::ExecuteQuery {
            query: "SELECT 1".to_string(),
        })
        .unwrap();
        assert_eq!(frame, r#"{"command":"executeQuery","query":"SELECT 1"}"#);
        assert_eq!(
            decode_guest(&frame).unwrap().command(),
            GuestCommand::ExecuteQuery
        );
    }

    #[test]
    fn test_encode_select_file() {
        let frame = encode_guest(&GuestMessage::SelectFile {
            default_file_name: "users.csv".to_string(),
            file_format: ExportFormat::Csv,
        })
        .unwrap();
        assert_eq!(
            frame,
            r#"{"command":"selectFile","defaultFileName":"users.csv","fileFormat":"csv"}"#
        );
    }

    #[test]
    fn test_decode_guest_rejects_host_tags() {
        let err = decode_guest(r#"{"command":"fileSelected","filePath":"x"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownCommand(tag) if tag == "fileSelected"));
    }
}
