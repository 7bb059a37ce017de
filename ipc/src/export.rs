//! Export request wire schema.
//!
//! [`ExportOptions`] is the payload of the `export` guest message. The source
//! is a tagged enum, so a table export can never carry a query and vice versa.
//! Format options are checked against the declared format by
//! [`ExportOptions::normalized`]; the host never sees a stale combination.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What is being exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    Table,
    Query,
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Sql,
}

impl ExportFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Sql => "sql",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Data source of an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportSource {
    Table { schema: String, table: String },
    Query { query: String },
}

impl ExportSource {
    pub fn kind(&self) -> ExportKind {
        match self {
            ExportSource::Table { .. } => ExportKind::Table,
            ExportSource::Query { .. } => ExportKind::Query,
        }
    }
}

/// CSV writer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvOptions {
    pub delimiter: String,
    pub quote_char: String,
    pub null_value: String,
    pub include_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            quote_char: "\"".to_string(),
            null_value: String::new(),
            include_headers: true,
        }
    }
}

/// Target of generated INSERT statements
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlOptions {
    pub target_schema: String,
    pub target_table: String,
}

/// Format-specific settings.
///
/// Untagged on the wire: the field names identify the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatOptions {
    Csv(CsvOptions),
    Sql(SqlOptions),
}

impl FormatOptions {
    /// Whether these options belong to `format`
    pub fn applies_to(&self, format: ExportFormat) -> bool {
        matches!(
            (self, format),
            (FormatOptions::Csv(_), ExportFormat::Csv) | (FormatOptions::Sql(_), ExportFormat::Sql)
        )
    }
}

/// Payload of the `export` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(flatten)]
    pub source: ExportSource,
    pub format: ExportFormat,
    /// Host-resolved output path
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_options: Option<FormatOptions>,
}

impl ExportOptions {
    pub fn kind(&self) -> ExportKind {
        self.source.kind()
    }

    /// Drops format options that do not apply to the declared format
    pub fn normalized(mut self) -> Self {
        if let Some(options) = &self.format_options {
            if !options.applies_to(self.format) {
                self.format_options = None;
            }
        }
        self
    }

    pub fn is_normalized(&self) -> bool {
        self.format_options
            .as_ref()
            .map_or(true, |options| options.applies_to(self.format))
    }
}
