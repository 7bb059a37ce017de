//! Panel configuration
//!
//! The host passes the panel's target table when it opens the panel. Form
//! defaults are typed values with serde defaults, so a partial (or empty)
//! JSON object is a valid configuration.

use crate::error::ConfigError;
use ipc::{CsvOptions, ExportFormat};
use serde::{Deserialize, Deserializer, Serialize};

/// Construction-time parameters supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelParams {
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub table_name: String,
}

impl PanelParams {
    /// Creates parameters for `schema.table_name`
    pub fn new(schema: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table_name: table_name.into(),
        }
    }

    /// Parses the parameters from the host's JSON payload
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Initial form values
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    #[serde(deserialize_with = "partial_csv")]
    pub csv: CsvOptions,
    pub format: ExportFormat,
}

/// CSV settings as written in configuration; every field is optional.
///
/// Kept apart from [`CsvOptions`] so the wire type stays strict.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CsvDefaults {
    delimiter: String,
    quote_char: String,
    null_value: String,
    include_headers: bool,
}

impl Default for CsvDefaults {
    fn default() -> Self {
        let CsvOptions {
            delimiter,
            quote_char,
            null_value,
            include_headers,
        } = CsvOptions::default();
        Self {
            delimiter,
            quote_char,
            null_value,
            include_headers,
        }
    }
}

fn partial_csv<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CsvOptions, D::Error> {
    let csv = CsvDefaults::deserialize(deserializer)?;
    Ok(CsvOptions {
        delimiter: csv.delimiter,
        quote_char: csv.quote_char,
        null_value: csv.null_value,
        include_headers: csv.include_headers,
    })
}

impl ExportDefaults {
    /// Parses defaults from JSON; missing fields keep their default values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
