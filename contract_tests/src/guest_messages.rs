//! Guest to host contract tests
//!
//! These tests define the stable frames the guest sends.

// ===== Command Tags =====
#[allow(dead_code)]
const COMMAND_SELECT_FILE: &str = "selectFile";
#[allow(dead_code)]
const COMMAND_EXPORT: &str = "export";
#[allow(dead_code)]
const COMMAND_EXECUTE_QUERY: &str = "executeQuery";

// ===== Contract Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use ipc::{
        encode_guest, ExportFormat, ExportOptions, ExportSource, GuestCommand, GuestMessage,
    };

    #[test]
    fn test_command_tags() {
        assert_eq!(GuestCommand::SelectFile.as_str(), COMMAND_SELECT_FILE);
        assert_eq!(GuestCommand::Export.as_str(), COMMAND_EXPORT);
        assert_eq!(GuestCommand::ExecuteQuery.as_str(), COMMAND_EXECUTE_QUERY);
    }

    #[test]
    fn test_select_file_contract() {
        verify_guest_contract(
            &GuestMessage::SelectFile {
                default_file_name: "users.csv".into(),
                file_format: ExportFormat::Csv,
            },
            r#"{"command":"selectFile","defaultFileName":"users.csv","fileFormat":"csv"}"#,
        );
    }

    #[test]
    fn test_execute_query_contract() {
        verify_guest_contract(
            &GuestMessage::ExecuteQuery {
                query: "SELECT 1".into(),
            },
            r#"{"command":"executeQuery","query":"SELECT 1"}"#,
        );
    }

    #[test]
    fn test_export_contract() {
        let message = GuestMessage::Export {
            options: ExportOptions {
                source: ExportSource::Query {
                    query: "SELECT * FROM t".into(),
                },
                format: ExportFormat::Json,
                destination: "/tmp/t.json".into(),
                format_options: None,
            },
        };
        verify_guest_contract(
            &message,
            r#"{"command":"export","options":{"kind":"query","query":"SELECT * FROM t","format":"json","destination":"/tmp/t.json"}}"#,
        );

        let frame = encode_guest(&message).unwrap();
        verify_command_tag(&frame, COMMAND_EXPORT);
    }

    #[test]
    fn test_format_spellings() {
        for (format, spelling) in [
            (ExportFormat::Csv, "csv"),
            (ExportFormat::Json, "json"),
            (ExportFormat::Sql, "sql"),
        ] {
            assert_eq!(
                serde_json::to_value(format).unwrap(),
                serde_json::Value::String(spelling.into())
            );
        }
    }
}
