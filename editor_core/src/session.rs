//! EditorSession state machine
//!
//! Owns one editing surface: the document, the selection, the active
//! extension set and the undo history. Every edit goes through here so the
//! selection always stays valid for the current document.

use crate::{
    document::Document,
    extension::{Extension, ExtensionSet},
    format::format_basic,
    keymap::{Chord, EditorCommand, ExecuteScope, Keymap},
    selection::{Selection, SelectionError},
    snapshot::EditorSnapshot,
    template,
    theme::ThemeMode,
};

const MAX_UNDO_STACK: usize = 100;

const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "ON", "GROUP",
    "ORDER", "BY", "HAVING", "LIMIT", "OFFSET", "INSERT", "INTO", "VALUES", "UPDATE", "SET",
    "DELETE", "CREATE", "TABLE", "DROP", "ALTER", "DISTINCT", "AS", "AND", "OR", "NOT", "NULL",
    "IS", "IN", "LIKE", "BETWEEN", "EXISTS", "UNION", "CASE", "WHEN", "THEN", "ELSE", "END",
];

/// Snapshot for undo/redo
#[derive(Debug, Clone)]
struct HistoryEntry {
    text: String,
    selection: Selection,
}

/// Outcome of handling a key chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No binding (or no keymap extension)
    Unhandled,
    /// A local command ran
    Applied(EditorCommand),
    /// The host layer must execute this text
    Execute(String),
    /// An execute command resolved to blank text; nothing to run
    Skipped,
}

/// Editor session
pub struct EditorSession {
    document: Document,
    selection: Selection,
    extensions: ExtensionSet,
    keymap: Keymap,
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl EditorSession {
    /// Creates an empty session with the standard extension set
    pub fn new(theme: ThemeMode) -> Self {
        Self::with_extensions(String::new(), ExtensionSet::standard(theme))
    }

    /// Creates a session holding `text`, caret at the start
    pub fn with_content(text: impl Into<String>, theme: ThemeMode) -> Self {
        Self::with_extensions(text, ExtensionSet::standard(theme))
    }

    pub fn with_extensions(text: impl Into<String>, extensions: ExtensionSet) -> Self {
        Self {
            document: Document::from_text(text),
            selection: Selection::cursor(0),
            extensions,
            keymap: Keymap::sql_defaults(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    // Public accessors

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.extensions.theme()
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    // Document access

    /// Whole document text
    pub fn get_value(&self) -> &str {
        self.document.as_str()
    }

    /// Replaces the whole document in one edit; the caret lands after the new text
    pub fn set_value(&mut self, text: &str) {
        self.record_history();
        self.document.replace_all(text);
        self.selection = Selection::cursor(self.document.len());
    }

    /// Selected text, empty for a caret
    pub fn get_selection(&self) -> &str {
        self.document.slice(self.selection.range()).unwrap_or_default()
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), SelectionError> {
        selection.validate(self.document.as_str())?;
        self.selection = selection;
        Ok(())
    }

    /// Replaces the selection with `text`; the caret ends right after it
    pub fn insert_text(&mut self, text: &str) {
        self.record_history();
        let from = self.selection.from();
        self.document.replace(self.selection.range(), text);
        self.selection = Selection::cursor(from + text.len());
    }

    /// Inserts the named template with its placeholders replaced by their labels
    pub fn insert_template(&mut self, name: &str) {
        let text = template::resolve(name);
        self.insert_text(&text);
    }

    /// Re-flows the document with [`format_basic`]
    pub fn format_basic(&mut self) {
        let formatted = format_basic(self.document.as_str());
        if formatted != self.document.as_str() {
            self.set_value(&formatted);
        }
    }

    // Execute resolution

    /// Text an execute command would run, `None` when it is blank
    pub fn resolve_execute(&self, scope: ExecuteScope) -> Option<String> {
        let text = match scope {
            ExecuteScope::All => self.document.as_str().trim(),
            ExecuteScope::Selection if self.selection.is_empty() => {
                self.document.as_str().trim()
            }
            ExecuteScope::Selection => self.get_selection().trim(),
        };
        (!text.is_empty()).then(|| text.to_string())
    }

    // Keymap

    /// Resolves `chord` through the keymap and runs local commands
    pub fn handle_key(&mut self, chord: &Chord) -> KeyOutcome {
        if !self.extensions.contains(Extension::Keymap) {
            return KeyOutcome::Unhandled;
        }
        let Some(command) = self.keymap.resolve(chord) else {
            return KeyOutcome::Unhandled;
        };

        match command {
            EditorCommand::Execute(scope) => match self.resolve_execute(scope) {
                Some(text) => KeyOutcome::Execute(text),
                None => KeyOutcome::Skipped,
            },
            EditorCommand::FormatBasic => {
                self.format_basic();
                KeyOutcome::Applied(command)
            }
            EditorCommand::Undo => {
                self.undo();
                KeyOutcome::Applied(command)
            }
            EditorCommand::Redo => {
                self.redo();
                KeyOutcome::Applied(command)
            }
        }
    }

    // History

    fn record_history(&mut self) {
        if !self.extensions.contains(Extension::History) {
            return;
        }
        self.undo_stack.push(HistoryEntry {
            text: self.document.as_str().to_string(),
            selection: self.selection,
        });
        // Clear redo stack on new edit
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.restore(entry);
        self.redo_stack.push(current);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.restore(entry);
        self.undo_stack.push(current);
        true
    }

    fn restore(&mut self, entry: HistoryEntry) -> HistoryEntry {
        let current = HistoryEntry {
            text: self.document.as_str().to_string(),
            selection: self.selection,
        };
        self.document.replace_all(&entry.text);
        self.selection = entry.selection;
        current
    }

    // Autocompletion

    /// Keywords and template names extending the word before the caret
    pub fn completions(&self) -> Vec<&'static str> {
        if !self.extensions.contains(Extension::Autocompletion) {
            return Vec::new();
        }
        let head = self.selection.head;
        let before = &self.document.as_str()[..head];
        let start = before
            .char_indices()
            .rev()
            .take_while(|(_, ch)| ch.is_alphanumeric() || *ch == '_')
            .last()
            .map_or(head, |(idx, _)| idx);
        let prefix = &before[start..];
        if prefix.is_empty() {
            return Vec::new();
        }

        SQL_KEYWORDS
            .iter()
            .copied()
            .chain(template::TEMPLATES.iter().map(|template| template.name))
            .filter(|candidate| {
                candidate.len() > prefix.len()
                    && candidate
                        .get(..prefix.len())
                        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
            .collect()
    }

    // Bracket matching

    /// Offset of the bracket matching the one at `offset`
    pub fn matching_bracket(&self, offset: usize) -> Option<usize> {
        if !self.extensions.contains(Extension::BracketMatching) {
            return None;
        }
        let bytes = self.document.as_str().as_bytes();
        let open = *bytes.get(offset)?;
        let (close, forward) = match open {
            b'(' => (b')', true),
            b'[' => (b']', true),
            b'{' => (b'}', true),
            b')' => (b'(', false),
            b']' => (b'[', false),
            b'}' => (b'{', false),
            _ => return None,
        };

        let mut depth = 0usize;
        let mut scan = |idx: usize| -> Option<usize> {
            if bytes[idx] == open {
                depth += 1;
            } else if bytes[idx] == close {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            None
        };

        if forward {
            (offset..bytes.len()).find_map(&mut scan)
        } else {
            (0..=offset).rev().find_map(&mut scan)
        }
    }

    // Search

    /// Selects the next occurrence of `query` after the selection, wrapping
    /// around to the start of the document
    pub fn find_next(&mut self, query: &str) -> bool {
        if query.is_empty() || !self.extensions.contains(Extension::Search) {
            return false;
        }
        let text = self.document.as_str();
        let start = self.selection.to();
        let found = text[start..]
            .find(query)
            .map(|pos| start + pos)
            .or_else(|| text.find(query));

        match found {
            Some(pos) => {
                self.selection = Selection::new(pos, pos + query.len());
                true
            }
            None => false,
        }
    }

    // Theme rebuild

    /// Tears down the extension set and its surface and builds a new one
    /// styled for `theme`. Document and selection are carried over
    /// unchanged; undo history belongs to the old surface and is dropped.
    pub fn rebuild_extensions(&mut self, theme: ThemeMode) {
        let selection = self.selection;
        let next = self.extensions.rethemed(theme);
        self.extensions = next;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.selection = selection;

        tracing::info!(
            theme = %theme,
            surface = self.extensions.surface(),
            document_len = self.document.len(),
            "rebuilt editor extensions"
        );
    }

    /// Get a complete snapshot of session state (for parity testing)
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            document: self.document.as_str().to_string(),
            selection: self.selection,
            theme: self.theme_mode(),
            surface: self.extensions.surface(),
            extensions: self
                .extensions
                .iter()
                .map(|extension| extension.name().to_string())
                .collect(),
            undo_depth: self.undo_stack.len(),
            redo_depth: self.redo_stack.len(),
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
