//! Destination path helpers

use ipc::{ExportFormat, ExportKind};

/// Replaces the extension of `path` with `extension`.
///
/// Only a dot after the last path separator (`/` or `\`) counts. Without one
/// the extension is appended.
pub fn change_file_extension(path: &str, extension: &str) -> String {
    let name_start = path.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => format!("{}.{}", &path[..name_start + dot], extension),
        None => format!("{path}.{extension}"),
    }
}

/// File name proposed to the host's save dialog
pub fn default_file_name(kind: ExportKind, table: &str, format: ExportFormat) -> String {
    let stem = match kind {
        ExportKind::Table if !table.trim().is_empty() => table.trim(),
        ExportKind::Table => "export",
        ExportKind::Query => "query_result",
    };
    format!("{stem}.{}", format.extension())
}
