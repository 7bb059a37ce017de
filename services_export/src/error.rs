//! Error types for the export panel

use thiserror::Error;

/// Form state that fails the submit guard. Nothing is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a destination file")]
    MissingDestination,

    #[error("Please enter a query to export")]
    BlankQuery,
}

/// Why a submit did not start an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an export is already running")]
    InFlight,
}

/// Invalid panel configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse panel configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
