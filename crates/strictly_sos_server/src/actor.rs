//! One task per room, draining commands in arrival order.

use crate::error::ServerError;
use crate::outbound::{ChannelOutbound, FrameSender};
use strictly_sos::{ClientMessage, GameConfig, Outbound, RoomController, RoomEvent, RoomId, SessionId};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Work items for a room task.
#[derive(Debug)]
pub enum RoomCommand {
    /// A connection entered the room.
    Join {
        /// Session identity.
        identity: SessionId,
        /// Channel for frames addressed to this session.
        sender: FrameSender,
    },
    /// A connection went away.
    Leave {
        /// Session identity.
        identity: SessionId,
    },
    /// A text frame arrived from a connection.
    Message {
        /// Session identity.
        identity: SessionId,
        /// Raw frame.
        text: String,
    },
}

/// Cloneable handle to a running room task.
///
/// The task stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    commands: mpsc::UnboundedSender<RoomCommand>,
}

impl RoomHandle {
    /// Spawns the task for a new room. Must be called inside a tokio runtime.
    #[instrument(skip(config))]
    pub fn spawn(room_id: RoomId, config: GameConfig) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        let controller = RoomController::with_config(room_id.clone(), config, ChannelOutbound::new());
        tokio::spawn(run(controller, inbox));
        Self { room_id, commands }
    }

    /// Room identifier.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Enqueues a join.
    pub fn join(&self, identity: SessionId, sender: FrameSender) -> Result<(), ServerError> {
        self.send(RoomCommand::Join { identity, sender })
    }

    /// Enqueues a leave.
    pub fn leave(&self, identity: SessionId) -> Result<(), ServerError> {
        self.send(RoomCommand::Leave { identity })
    }

    /// Enqueues a raw client frame.
    pub fn message(&self, identity: SessionId, text: String) -> Result<(), ServerError> {
        self.send(RoomCommand::Message { identity, text })
    }

    fn send(&self, command: RoomCommand) -> Result<(), ServerError> {
        self.commands
            .send(command)
            .map_err(|_| ServerError::RoomClosed(self.room_id.clone()))
    }
}

#[instrument(skip_all, fields(room_id = %controller.room_id()))]
async fn run(
    mut controller: RoomController<ChannelOutbound>,
    mut inbox: mpsc::UnboundedReceiver<RoomCommand>,
) {
    while let Some(command) = inbox.recv().await {
        match command {
            RoomCommand::Join { identity, sender } => {
                controller.outbound_mut().connect(identity.clone(), sender);
                controller.on_join(&identity);
                sync_state(&mut controller);
            }
            RoomCommand::Leave { identity } => {
                controller.on_leave(&identity);
                controller.outbound_mut().disconnect(&identity);
                sync_state(&mut controller);
            }
            RoomCommand::Message { identity, text } => {
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(message) => {
                        controller.on_client_message(&identity, message);
                    }
                    Err(e) => debug!(session_id = %identity, error = %e, "Ignoring malformed frame"),
                }
            }
        }
    }
    info!("Room closed");
}

/// Pushes the full state to every connection after membership changes.
fn sync_state(controller: &mut RoomController<ChannelOutbound>) {
    let snapshot = controller.snapshot();
    controller.outbound_mut().send_to_all(RoomEvent::State(snapshot));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::OUTBOUND_CAPACITY;
    use strictly_sos::RoomOptions;

    #[tokio::test]
    async fn test_join_receives_seat_then_state() {
        let config = RoomOptions::default().resolve().unwrap();
        let handle = RoomHandle::spawn("r1".to_string(), config);
        let (tx, mut rx) = mpsc::channel(OUTBOUND_CAPACITY);
        handle.join("alice".to_string(), tx).unwrap();

        let seat: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(seat["event"], "seat");
        assert_eq!(seat["payload"]["playerKey"], "player1");
        assert_eq!(seat["payload"]["roomId"], "r1");

        let state: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(state["event"], "state");
        assert_eq!(state["payload"]["playerCount"], 1);
    }
}
