//! # Editor Core
//!
//! Query editor session logic, independent of any rendering surface.
//!
//! ## Philosophy
//!
//! - **String document**: The buffer is one string, selections are byte offsets
//! - **Deterministic**: Same edit trace => same session state
//! - **Composable**: Behaviours live in an ordered extension set
//! - **Wholesale rebuilds**: A theme change replaces every extension at once,
//!   while document and selection carry over untouched
//! - **No ambient authority**: Execute commands are returned to the host layer,
//!   the core never talks to a channel
//!
//! ## Design
//!
//! The core provides:
//! - EditorSession: document, selection, extensions, history
//! - ThemeReconciler: explicit theme-change entry point
//! - Templates and the best-effort `format_basic` re-flow
//! - Keymap: chord to command resolution
//! - EditorSnapshot: deterministic state for parity testing

pub mod document;
pub mod extension;
pub mod format;
pub mod keymap;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod template;
pub mod theme;

pub use document::Document;
pub use extension::{Extension, ExtensionSet, Language};
pub use format::{format_basic, CLAUSE_KEYWORDS};
pub use keymap::{Binding, Chord, EditorCommand, ExecuteScope, Key, Keymap, Modifiers};
pub use selection::{Selection, SelectionError};
pub use session::{EditorSession, KeyOutcome};
pub use snapshot::EditorSnapshot;
pub use template::{expand_placeholders, Template, TEMPLATES};
pub use theme::{Reconcile, ThemeMode, ThemeReconciler};
