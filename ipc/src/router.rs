//! Per-command dispatch of host messages
//!
//! A router maps each host command tag to at most one handler. Handlers get
//! mutable access to the state owned by whoever holds the router, so the
//! router never outlives or aliases that state.

use crate::message::{HostCommand, HostMessage};
use std::collections::BTreeMap;

/// Handler invoked for one host command
pub type Handler<S> = Box<dyn FnMut(&mut S, &HostMessage)>;

/// Result of dispatching a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran
    Handled,
    /// No handler is registered for the command
    Ignored,
}

/// Dispatch table from host command to handler
pub struct Router<S> {
    routes: BTreeMap<HostCommand, Handler<S>>,
}

impl<S> Router<S> {
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Registers the handler for `command`, replacing any previous one
    pub fn on(
        &mut self,
        command: HostCommand,
        handler: impl FnMut(&mut S, &HostMessage) + 'static,
    ) {
        if self.routes.insert(command, Box::new(handler)).is_some() {
            tracing::debug!(%command, "replaced message handler");
        }
    }

    /// Removes the handler for `command`, returning whether one existed
    pub fn remove(&mut self, command: HostCommand) -> bool {
        self.routes.remove(&command).is_some()
    }

    /// Removes every handler
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    pub fn is_registered(&self, command: HostCommand) -> bool {
        self.routes.contains_key(&command)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes `message` to its handler
    pub fn dispatch(&mut self, state: &mut S, message: &HostMessage) -> Dispatch {
        let command = message.command();
        match self.routes.get_mut(&command) {
            Some(handler) => {
                handler(state, message);
                Dispatch::Handled
            }
            None => {
                tracing::debug!(%command, "no handler registered, ignoring message");
                Dispatch::Ignored
            }
        }
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}
