//! Export form state
//!
//! The draft keeps every field the user typed, for every format, so
//! switching formats back and forth loses nothing. Only
//! [`ExportDraft::to_request`] decides what reaches the wire.

use crate::config::{ExportDefaults, PanelParams};
use crate::error::ValidationError;
use ipc::{
    CsvOptions, ExportFormat, ExportKind, ExportOptions, ExportSource, FormatOptions, SqlOptions,
};

/// Editable export form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDraft {
    pub kind: ExportKind,
    pub schema: String,
    pub table: String,
    pub query: String,
    pub format: ExportFormat,
    pub destination: String,
    pub csv: CsvOptions,
    /// Blank fields fall back to the source schema and table
    pub sql: SqlOptions,
}

impl ExportDraft {
    /// Creates a table export draft for the panel's table
    pub fn new(params: &PanelParams, defaults: &ExportDefaults) -> Self {
        Self {
            kind: ExportKind::Table,
            schema: params.schema.clone(),
            table: params.table_name.clone(),
            query: String::new(),
            format: defaults.format,
            destination: String::new(),
            csv: defaults.csv.clone(),
            sql: SqlOptions::default(),
        }
    }

    /// Checks the submit guard
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.destination.trim().is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if self.kind == ExportKind::Query && self.query.trim().is_empty() {
            return Err(ValidationError::BlankQuery);
        }
        Ok(())
    }

    /// Builds the normalized request sent with the `export` message
    pub fn to_request(&self) -> Result<ExportOptions, ValidationError> {
        self.validate()?;

        let source = match self.kind {
            ExportKind::Table => ExportSource::Table {
                schema: self.schema.clone(),
                table: self.table.clone(),
            },
            ExportKind::Query => ExportSource::Query {
                query: self.query.trim().to_string(),
            },
        };

        let format_options = match self.format {
            ExportFormat::Csv => Some(FormatOptions::Csv(self.csv.clone())),
            ExportFormat::Sql => Some(FormatOptions::Sql(self.sql_target())),
            ExportFormat::Json => None,
        };

        Ok(ExportOptions {
            source,
            format: self.format,
            destination: self.destination.clone(),
            format_options,
        }
        .normalized())
    }

    fn sql_target(&self) -> SqlOptions {
        let or_default = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.trim().to_string()
            }
        };
        SqlOptions {
            target_schema: or_default(&self.sql.target_schema, &self.schema),
            target_table: or_default(&self.sql.target_table, &self.table),
        }
    }
}
