//! # Guest/Host Message Channel
//!
//! This crate defines the message-passing contract between a sandboxed panel
//! (the guest) and the privileged controller that performs long-running work
//! (the host).
//!
//! ## Philosophy
//!
//! - **Messages, not shared memory**: All communication is explicit message passing
//! - **Closed catalogs**: Each direction has one tagged union, matched exhaustively
//! - **Fire-and-forget**: Sends never block and never fail loudly
//! - **Wire-compatible**: Tag strings and field names are the stable contract
//!
//! ## Architecture
//!
//! Every frame is a JSON object discriminated by its `command` field:
//! - [`GuestMessage`]: guest → host (`selectFile`, `export`, `executeQuery`)
//! - [`HostMessage`]: host → guest (`fileSelected`, `exportProgress`,
//!   `exportComplete`, `error`)
//!
//! A [`Channel`] pushes guest frames through a [`HostLink`]. Inbound frames are
//! decoded with [`decode_host`] and handed to a [`Router`], which holds exactly
//! one handler per command tag.
//!
//! There are no correlation ids. Responses are matched to requests by command
//! tag and by the state of whoever consumes them, so a panel supports at most
//! one in-flight export.

pub mod channel;
pub mod export;
pub mod message;
pub mod router;

pub use channel::{Channel, ChannelId, HostLink, LinkError, MemoryLink};
pub use export::{
    CsvOptions, ExportFormat, ExportKind, ExportOptions, ExportSource, FormatOptions, SqlOptions,
};
pub use message::{
    decode_guest, decode_host, encode_guest, encode_host, DecodeError, GuestCommand,
    GuestMessage, HostCommand, HostMessage,
};
pub use router::{Dispatch, Handler, Router};
