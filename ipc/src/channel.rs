//! Channel abstraction for guest → host message passing

use crate::message::{decode_guest, encode_guest, DecodeError, GuestMessage};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a communication channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(Uuid);

impl ChannelId {
    /// Creates a new random channel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({})", self.0)
    }
}

/// Failure to hand a frame to the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("host is not listening")]
    Disconnected,
}

/// Outbound transport towards the host.
///
/// Implementations must preserve the order of posted frames.
pub trait HostLink {
    fn post(&mut self, frame: String) -> Result<(), LinkError>;
}

/// In-memory link that queues frames instead of delivering them
#[derive(Debug, Clone)]
pub struct MemoryLink {
    outbox: VecDeque<String>,
    connected: bool,
}

impl MemoryLink {
    pub fn new() -> Self {
        Self {
            outbox: VecDeque::new(),
            connected: true,
        }
    }

    /// Simulates the host going away; later posts fail
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn reconnect(&mut self) {
        self.connected = true;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn sent_len(&self) -> usize {
        self.outbox.len()
    }

    /// Raw frames posted so far, oldest first
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.outbox.iter().map(String::as_str)
    }

    /// Drains and decodes every queued frame
    pub fn take_sent(&mut self) -> Result<Vec<GuestMessage>, DecodeError> {
        self.outbox.drain(..).map(|frame| decode_guest(&frame)).collect()
    }
}

impl Default for MemoryLink {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLink for MemoryLink {
    fn post(&mut self, frame: String) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::Disconnected);
        }
        self.outbox.push_back(frame);
        Ok(())
    }
}

/// Guest end of the guest/host channel.
///
/// `send` is fire-and-forget: a frame the link refuses is dropped and counted,
/// never reported to the caller.
pub struct Channel<L: HostLink> {
    id: ChannelId,
    link: L,
    sent: u64,
    dropped: u64,
}

impl<L: HostLink> Channel<L> {
    pub fn new(link: L) -> Self {
        Self {
            id: ChannelId::new(),
            link,
            sent: 0,
            dropped: 0,
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Sends a message to the host
    pub fn send(&mut self, message: &GuestMessage) {
        let command = message.command();
        let frame = match encode_guest(message) {
            Ok(frame) => frame,
            Err(err) => {
                self.dropped += 1;
                tracing::error!(channel = %self.id, %command, error = %err, "failed to encode guest message");
                return;
            }
        };

        match self.link.post(frame) {
            Ok(()) => {
                self.sent += 1;
                tracing::debug!(channel = %self.id, %command, "sent guest message");
            }
            Err(err) => {
                self.dropped += 1;
                tracing::debug!(channel = %self.id, %command, reason = %err, "dropped guest message");
            }
        }
    }

    /// Number of frames accepted by the link
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Number of frames silently dropped
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}
