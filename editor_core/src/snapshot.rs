//! Editor snapshot for deterministic parity testing

use crate::{Selection, ThemeMode};
#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Complete session state snapshot for parity testing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub document: String,
    pub selection: Selection,
    pub theme: ThemeMode,
    pub surface: u64,
    pub extensions: Vec<String>,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in parity tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.document.as_bytes());
        hasher.update([0]);

        hasher.update(self.selection.anchor.to_le_bytes());
        hasher.update(self.selection.head.to_le_bytes());

        hasher.update(self.theme.as_str().as_bytes());
        hasher.update(self.surface.to_le_bytes());

        for name in &self.extensions {
            hasher.update(name.as_bytes());
            hasher.update(b"\n");
        }

        hasher.update(self.undo_depth.to_le_bytes());
        hasher.update(self.redo_depth.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
