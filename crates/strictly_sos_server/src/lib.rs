//! WebSocket server for the SOS game room.
//!
//! Connections are matched into rooms of two by [`RoomRegistry`]. Each room
//! runs as its own task ([`RoomHandle`]) that owns a
//! [`strictly_sos::RoomController`] and processes joins, leaves and frames
//! strictly in arrival order. Events go back to each connection as JSON text
//! frames through [`ChannelOutbound`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod actor;
mod error;
mod outbound;
mod registry;
mod settings;
mod ws;

// Crate-level exports - Errors
pub use error::ServerError;

// Crate-level exports - Settings
pub use settings::{HOST_VAR, PORT_VAR, ServerSettings};

// Crate-level exports - Rooms
pub use actor::{RoomCommand, RoomHandle};
pub use outbound::{ChannelOutbound, FrameSender, OUTBOUND_CAPACITY};
pub use registry::{MAX_OCCUPANTS, RoomRegistry, new_session_id};

// Crate-level exports - HTTP
pub use ws::{AppState, router};
