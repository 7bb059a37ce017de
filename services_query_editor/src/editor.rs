//! Main query editor implementation

use editor_core::{
    Chord, EditorSession, ExecuteScope, KeyOutcome, Reconcile, Selection, SelectionError,
    ThemeMode, ThemeReconciler,
};
use ipc::{Channel, GuestMessage, HostLink};

/// Callback that receives the text of an execute command
pub type ExecuteCallback = Box<dyn FnMut(&str)>;

/// Where an execute command went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// The resolved text was blank; nothing happened
    Skipped,
    /// Handed to the registered callback
    Callback,
    /// Sent to the host as `executeQuery`
    Sent,
}

/// Query editor bound to a host channel
pub struct QueryEditor<L: HostLink> {
    session: EditorSession,
    channel: Channel<L>,
    on_execute: Option<ExecuteCallback>,
    reconciler: ThemeReconciler,
}

impl<L: HostLink> QueryEditor<L> {
    /// Create an empty editor styled for `theme`
    pub fn new(link: L, theme: ThemeMode) -> Self {
        Self::from_session(link, EditorSession::new(theme))
    }

    /// Create an editor holding `text`
    pub fn with_content(link: L, text: &str, theme: ThemeMode) -> Self {
        Self::from_session(link, EditorSession::with_content(text, theme))
    }

    /// Wrap an existing session
    pub fn from_session(link: L, session: EditorSession) -> Self {
        Self {
            session,
            channel: Channel::new(link),
            on_execute: None,
            reconciler: ThemeReconciler::new(),
        }
    }

    /// Get the editor session
    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Get the mutable editor session
    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn channel(&self) -> &Channel<L> {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut Channel<L> {
        &mut self.channel
    }

    // Document operations

    pub fn get_value(&self) -> &str {
        self.session.get_value()
    }

    pub fn set_value(&mut self, text: &str) {
        self.session.set_value(text);
    }

    pub fn get_selection(&self) -> &str {
        self.session.get_selection()
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), SelectionError> {
        self.session.set_selection(selection)
    }

    pub fn insert_text(&mut self, text: &str) {
        self.session.insert_text(text);
    }

    pub fn insert_template(&mut self, name: &str) {
        self.session.insert_template(name);
    }

    pub fn format_basic(&mut self) {
        self.session.format_basic();
    }

    // Execute

    /// Register the execute callback. While one is registered, execute
    /// commands go to it instead of the host.
    pub fn set_on_execute(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_execute = Some(Box::new(callback));
    }

    pub fn clear_on_execute(&mut self) {
        self.on_execute = None;
    }

    /// Execute the whole document
    pub fn execute_all(&mut self) -> Execution {
        self.execute(ExecuteScope::All)
    }

    /// Execute the selection, or the whole document when nothing is selected
    pub fn execute_selection(&mut self) -> Execution {
        self.execute(ExecuteScope::Selection)
    }

    fn execute(&mut self, scope: ExecuteScope) -> Execution {
        match self.session.resolve_execute(scope) {
            Some(query) => self.dispatch(query),
            None => {
                tracing::debug!(channel = %self.channel.id(), ?scope, "skipping blank execute");
                Execution::Skipped
            }
        }
    }

    fn dispatch(&mut self, query: String) -> Execution {
        match self.on_execute.as_mut() {
            Some(callback) => {
                tracing::debug!(channel = %self.channel.id(), len = query.len(), "execute handed to callback");
                callback(&query);
                Execution::Callback
            }
            None => {
                tracing::debug!(channel = %self.channel.id(), len = query.len(), "execute sent to host");
                self.channel.send(&GuestMessage::ExecuteQuery { query });
                Execution::Sent
            }
        }
    }

    // Input

    /// Process a key chord. Execute bindings are dispatched like
    /// [`execute_all`](Self::execute_all) and
    /// [`execute_selection`](Self::execute_selection).
    pub fn handle_key(&mut self, chord: &Chord) -> KeyOutcome {
        let outcome = self.session.handle_key(chord);
        if let KeyOutcome::Execute(query) = &outcome {
            self.dispatch(query.clone());
        }
        outcome
    }

    // Theme

    /// Entry point for the host's theme signal
    pub fn on_external_theme_change(&mut self, mode: ThemeMode) -> Reconcile {
        let outcome = self.reconciler.reconcile(&mut self.session, mode);
        tracing::info!(
            channel = %self.channel.id(),
            theme = %mode,
            rebuilt = outcome == Reconcile::Rebuilt,
            "external theme change"
        );
        outcome
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.session.theme_mode()
    }

    /// Number of extension rebuilds caused by theme changes
    pub fn theme_rebuilds(&self) -> u64 {
        self.reconciler.rebuilds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editor_core::{Key, Modifiers};
    use ipc::MemoryLink;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor(text: &str) -> QueryEditor<MemoryLink> {
        QueryEditor::with_content(MemoryLink::new(), text, ThemeMode::Light)
    }

    fn sent_queries(editor: &mut QueryEditor<MemoryLink>) -> Vec<String> {
        editor
            .channel_mut()
            .link_mut()
            .take_sent()
            .unwrap()
            .into_iter()
            .filter_map(|message| match message {
                GuestMessage::ExecuteQuery { query } => Some(query),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_execute_all_sends_trimmed_query() {
        let mut editor = editor("  SELECT 1;  ");
        assert_eq!(editor.execute_all(), Execution::Sent);
        assert_eq!(sent_queries(&mut editor), vec!["SELECT 1;"]);
    }

    #[test]
    fn test_blank_document_is_noop() {
        let mut editor = editor(" \n\t ");
        assert_eq!(editor.execute_all(), Execution::Skipped);
        assert_eq!(editor.execute_selection(), Execution::Skipped);
        assert_eq!(editor.channel().link().sent_len(), 0);
    }

    #[test]
    fn test_callback_replaces_channel() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut editor = editor("SELECT 1");
        editor.set_on_execute(move |query| sink.borrow_mut().push(query.to_string()));

        assert_eq!(editor.execute_all(), Execution::Callback);
        assert_eq!(*seen.borrow(), vec!["SELECT 1".to_string()]);
        assert_eq!(editor.channel().link().sent_len(), 0);

        editor.clear_on_execute();
        assert_eq!(editor.execute_all(), Execution::Sent);
    }

    #[test]
    fn test_skipped_execute_reaches_neither_sink() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);

        let mut editor = editor("   ");
        editor.set_on_execute(move |_| *counter.borrow_mut() += 1);

        assert_eq!(editor.execute_selection(), Execution::Skipped);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(editor.channel().link().sent_len(), 0);
    }

    #[test]
    fn test_handle_key_dispatches_execute() {
        let mut editor = editor("SELECT 1;\nSELECT 2;");
        editor.set_selection(Selection::new(0, 9)).unwrap();

        let outcome = editor.handle_key(&Chord::new(Key::Enter, Modifiers::CTRL));
        assert_eq!(outcome, KeyOutcome::Execute("SELECT 1;".to_string()));

        let outcome = editor.handle_key(&Chord::new(Key::Enter, Modifiers::META.with_shift()));
        assert_eq!(outcome, KeyOutcome::Execute("SELECT 1;\nSELECT 2;".to_string()));

        assert_eq!(
            sent_queries(&mut editor),
            vec!["SELECT 1;", "SELECT 1;\nSELECT 2;"]
        );
    }

    #[test]
    fn test_theme_change() {
        let mut editor = editor("SELECT 1");
        assert_eq!(
            editor.on_external_theme_change(ThemeMode::Light),
            Reconcile::Unchanged
        );
        assert_eq!(
            editor.on_external_theme_change(ThemeMode::Dark),
            Reconcile::Rebuilt
        );
        assert_eq!(editor.get_value(), "SELECT 1");
        assert_eq!(editor.theme_mode(), ThemeMode::Dark);
        assert_eq!(editor.theme_rebuilds(), 1);
    }
}
