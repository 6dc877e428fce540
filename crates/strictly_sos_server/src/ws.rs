//! HTTP routes and the per-connection WebSocket loop.

use crate::outbound::OUTBOUND_CAPACITY;
use crate::registry::{RoomRegistry, new_session_id};
use crate::settings::ServerSettings;
use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use strictly_sos::RoomOptions;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Shared state for the HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    registry: RoomRegistry,
}

impl AppState {
    /// Wraps a registry.
    pub fn new(registry: RoomRegistry) -> Self {
        Self { registry }
    }

    /// The room registry.
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }
}

/// Builds the router: the room endpoint at `/<room_name>` and `/health`.
pub fn router(settings: &ServerSettings, state: AppState) -> Router {
    Router::new()
        .route(&settings.room_path(), get(upgrade))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn upgrade(
    ws: WebSocketUpgrade,
    Query(options): Query<RoomOptions>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| connection(socket, options, state.registry))
}

#[instrument(skip(socket, registry))]
async fn connection(mut socket: WebSocket, options: RoomOptions, registry: RoomRegistry) {
    let session_id = new_session_id();
    let handle = match registry.join_or_create(options) {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Room creation refused");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };
    info!(session_id = %session_id, room_id = %handle.room_id(), "Connection opened");

    let (frames_tx, mut frames_rx) = mpsc::channel::<String>(OUTBOUND_CAPACITY);
    if handle.join(session_id.clone(), frames_tx).is_err() {
        registry.release(handle.room_id());
        return;
    }

    let (mut sink, mut stream) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = frames_rx.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let inbound = handle.clone();
    let identity = session_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => {
                    if inbound.message(identity.clone(), text.as_str().to_owned()).is_err() {
                        break;
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    if let Err(e) = handle.leave(session_id.clone()) {
        debug!(error = %e, "Room already gone on leave");
    }
    registry.release(handle.room_id());
    info!(session_id = %session_id, "Connection closed");
}
