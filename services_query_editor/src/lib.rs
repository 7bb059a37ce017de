//! # Query Editor Service
//!
//! SQL query editor embedded in the guest panel.
//!
//! ## Philosophy
//!
//! - **Thin shell**: Editing logic lives in `editor_core`; this crate adds the host channel
//! - **One execute path**: Keybindings and direct calls resolve and dispatch the same way
//! - **Explicit theme signal**: The host reports theme changes, nothing is observed
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A renderer or syntax highlighter
//! - A SQL parser or validator
//!
//! ## Design
//!
//! - Execute commands go to a registered callback, or to the host as `executeQuery`
//! - Blank execute text is dropped before it reaches either
//! - Theme changes rebuild every extension, keeping document and selection

pub mod editor;

pub use editor::{ExecuteCallback, Execution, QueryEditor};
