//! Theme mode and the reconciler that applies external theme changes

use crate::session::EditorSession;
#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Light or dark styling, derived from the host's theme signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Maps the host's "dark mode" indicator to a mode
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a theme notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// The session already uses this mode
    Unchanged,
    /// Extensions and surface were rebuilt
    Rebuilt,
}

/// Applies external theme changes to a session.
///
/// The host calls [`ThemeReconciler::reconcile`] whenever its theme signal
/// fires. Repeated notifications with the same mode are no-ops.
#[derive(Debug, Clone, Default)]
pub struct ThemeReconciler {
    rebuilds: u64,
}

impl ThemeReconciler {
    pub fn new() -> Self {
        Self { rebuilds: 0 }
    }

    pub fn reconcile(&mut self, session: &mut EditorSession, mode: ThemeMode) -> Reconcile {
        if session.theme_mode() == mode {
            return Reconcile::Unchanged;
        }
        session.rebuild_extensions(mode);
        self.rebuilds += 1;
        Reconcile::Rebuilt
    }

    /// Number of rebuilds performed so far
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}
