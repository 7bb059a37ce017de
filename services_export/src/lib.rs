//! # Export Service
//!
//! Guest side of the data export panel.
//!
//! ## Philosophy
//!
//! - **Single flight**: At most one export per panel, enforced by the state machine
//! - **Explicit events**: Every transition is driven by a user action or a host message
//! - **Silent transport**: A vanished host is never reported as an error
//! - **Normalized requests**: The host never sees options for another format
//!
//! ## Features
//!
//! - Export form with per-format options kept across format switches
//! - Submit validation (destination, non-blank query)
//! - Progress tracking (monotonic within a run, reset on resubmit)
//! - Host save-dialog exchange and local extension rewrite
//!
//! ## Example
//!
//! ```ignore
//! use services_export::{ExportDefaults, ExportPanel, PanelParams};
//! use ipc::MemoryLink;
//!
//! let params = PanelParams::from_json(r#"{"schema":"public","tableName":"users"}"#)?;
//! let mut panel = ExportPanel::new(params, ExportDefaults::default(), MemoryLink::new());
//!
//! panel.choose_destination();
//! panel.receive(r#"{"command":"fileSelected","filePath":"/tmp/users.csv"}"#);
//! panel.submit()?;
//! ```

pub mod config;
pub mod draft;
pub mod error;
pub mod file_path;
pub mod file_selection;
pub mod operation;
pub mod panel;

pub use config::{ExportDefaults, PanelParams};
pub use draft::ExportDraft;
pub use error::{ConfigError, SubmitError, ValidationError};
pub use file_path::{change_file_extension, default_file_name};
pub use file_selection::FileSelection;
pub use operation::{OperationState, Phase};
pub use panel::{ExportPanel, PanelState};
