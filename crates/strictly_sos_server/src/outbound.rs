//! Per-session delivery channels.

use std::collections::HashMap;
use strictly_sos::{Outbound, RoomEvent, SessionId};
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, warn};

/// Outbound text frames for one connection.
pub type FrameSender = Sender<String>;

/// Frames queued per connection before new ones are dropped.
pub const OUTBOUND_CAPACITY: usize = 64;

/// Delivers room events as JSON text frames over per-session channels.
///
/// Sends never wait. A full or closed channel only drops that session's
/// frame.
#[derive(Debug, Default)]
pub struct ChannelOutbound {
    peers: HashMap<SessionId, FrameSender>,
}

impl ChannelOutbound {
    /// Creates an outbound with no peers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the channel for `identity`.
    pub fn connect(&mut self, identity: SessionId, sender: FrameSender) {
        self.peers.insert(identity, sender);
    }

    /// Drops the channel for `identity`.
    pub fn disconnect(&mut self, identity: &str) {
        self.peers.remove(identity);
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns true when no channel is registered.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    fn encode(event: &RoomEvent) -> Option<String> {
        serde_json::to_string(event)
            .inspect_err(|e| error!(event = event.name(), error = %e, "Failed to encode event"))
            .ok()
    }

    fn deliver(identity: &str, sender: &FrameSender, frame: String) {
        match sender.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(session_id = identity, "Outbound queue full, dropping frame");
            }
            Err(TrySendError::Closed(_)) => {
                warn!(session_id = identity, "Dropping frame for closed connection");
            }
        }
    }
}

impl Outbound for ChannelOutbound {
    fn send_to_one(&mut self, identity: &str, event: RoomEvent) {
        let Some(sender) = self.peers.get(identity) else {
            debug!(session_id = identity, event = event.name(), "No channel for session");
            return;
        };
        if let Some(frame) = Self::encode(&event) {
            Self::deliver(identity, sender, frame);
        }
    }

    fn send_to_all(&mut self, event: RoomEvent) {
        let Some(frame) = Self::encode(&event) else {
            return;
        };
        for (identity, sender) in &self.peers {
            Self::deliver(identity, sender, frame.clone());
        }
    }
}
