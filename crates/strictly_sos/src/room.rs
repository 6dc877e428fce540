//! Room controller: reacts to join, leave and placement events.

use crate::config::{ConfigError, GameConfig, RoomOptions};
use crate::events::{CellView, ClientMessage, MoveResult, RoomEvent, SeatAssignment, StateSnapshot};
use crate::seats::SeatRegistry;
use crate::state::GameState;
use crate::types::{RoomId, Seat, SessionId};
use crate::validation::{PlacementRequest, Rejection, validate_placement};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, RoomInvariants};

/// Delivery primitives the room needs from its transport.
///
/// Delivery is fire-and-forget: a failure for one session must not affect
/// any other.
pub trait Outbound {
    /// Delivers `event` to a single session.
    fn send_to_one(&mut self, identity: &str, event: RoomEvent);

    /// Delivers `event` to every connected session.
    fn send_to_all(&mut self, event: RoomEvent);
}

/// Recipient of a recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One session.
    One(SessionId),
    /// Every connected session.
    All,
}

/// An event together with its recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Recipient.
    pub target: Target,
    /// Event.
    pub event: RoomEvent,
}

/// Records events instead of delivering them.
impl Outbound for Vec<Dispatch> {
    fn send_to_one(&mut self, identity: &str, event: RoomEvent) {
        self.push(Dispatch {
            target: Target::One(identity.to_string()),
            event,
        });
    }

    fn send_to_all(&mut self, event: RoomEvent) {
        self.push(Dispatch {
            target: Target::All,
            event,
        });
    }
}

/// Owns one room's state and serializes every change to it.
///
/// Callers must deliver events one at a time; `&mut self` on every handler
/// enforces that within a process.
#[derive(Debug)]
pub struct RoomController<O> {
    room_id: RoomId,
    state: GameState,
    seats: SeatRegistry,
    present: BTreeSet<SessionId>,
    outbound: O,
}

impl<O: Outbound> RoomController<O> {
    /// Creates a room from caller options.
    ///
    /// # Errors
    ///
    /// Fails on malformed options; no room exists in that case.
    #[instrument(skip(outbound))]
    pub fn new(room_id: RoomId, options: &RoomOptions, outbound: O) -> Result<Self, ConfigError> {
        let config = options.resolve()?;
        Ok(Self::with_config(room_id, config, outbound))
    }

    /// Creates a room from an already resolved configuration.
    #[instrument(skip(outbound))]
    pub fn with_config(room_id: RoomId, config: GameConfig, outbound: O) -> Self {
        info!(
            room_id = %room_id,
            width = config.width(),
            height = config.height(),
            mode = %config.mode(),
            target_word = %config.target_word(),
            "Room created"
        );
        Self {
            room_id,
            state: GameState::new(config),
            seats: SeatRegistry::new(),
            present: BTreeSet::new(),
            outbound,
        }
    }

    /// Room identifier.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Authoritative game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seat bookkeeping.
    pub fn seats(&self) -> &SeatRegistry {
        &self.seats
    }

    /// Number of connected identities.
    pub fn player_count(&self) -> usize {
        self.present.len()
    }

    /// The delivery sink.
    pub fn outbound(&self) -> &O {
        &self.outbound
    }

    /// Mutable access to the delivery sink.
    pub fn outbound_mut(&mut self) -> &mut O {
        &mut self.outbound
    }

    /// Seats a newly connected identity and tells it which seat it got.
    #[instrument(skip(self), fields(room_id = %self.room_id))]
    pub fn on_join(&mut self, identity: &str) -> Seat {
        let seat = self.seats.assign(identity);
        self.present.insert(identity.to_string());
        info!(seat = %seat, players = self.present.len(), "Player joined");

        self.outbound.send_to_one(
            identity,
            RoomEvent::Seat(SeatAssignment {
                session_id: identity.to_string(),
                player_key: seat,
                room_id: self.room_id.clone(),
            }),
        );
        seat
    }

    /// Forgets a disconnected identity. Board, scores and turn are kept.
    #[instrument(skip(self), fields(room_id = %self.room_id))]
    pub fn on_leave(&mut self, identity: &str) -> Option<Seat> {
        let seat = self.seats.release(identity);
        self.present.remove(identity);
        info!(?seat, players = self.present.len(), "Player left");
        seat
    }

    /// Dispatches a named client message. Unknown names and malformed
    /// payloads are ignored.
    #[instrument(skip(self, payload), fields(room_id = %self.room_id))]
    pub fn on_message(
        &mut self,
        name: &str,
        identity: &str,
        payload: serde_json::Value,
    ) -> Option<MoveResult> {
        match name {
            "place_letter" => match serde_json::from_value::<PlacementRequest>(payload) {
                Ok(request) => self.on_placement_request(identity, &request).ok(),
                Err(e) => {
                    debug!(error = %e, "Malformed place_letter payload ignored");
                    None
                }
            },
            other => {
                debug!(message = other, "Unknown message ignored");
                None
            }
        }
    }

    /// Dispatches a parsed client message.
    pub fn on_client_message(&mut self, identity: &str, message: ClientMessage) -> Option<MoveResult> {
        match message {
            ClientMessage::PlaceLetter(request) => self.on_placement_request(identity, &request).ok(),
        }
    }

    /// Validates and applies a placement, broadcasting the result.
    ///
    /// A rejection changes nothing and emits nothing; it is returned only
    /// so callers can observe the decision.
    #[instrument(skip(self), fields(room_id = %self.room_id))]
    pub fn on_placement_request(
        &mut self,
        identity: &str,
        request: &PlacementRequest,
    ) -> Result<MoveResult, Rejection> {
        let seat = self.seats.seat_of(identity);
        let placement = validate_placement(&self.state, seat, request).inspect_err(|rejection| {
            debug!(%rejection, "Placement rejected");
        })?;

        let resolution = self.state.play(placement).inspect_err(|e| {
            warn!(error = %e, "Validated placement failed to apply");
        })?;

        #[cfg(debug_assertions)]
        {
            if let Err(violations) = RoomInvariants::check_all(&self.state) {
                tracing::error!(?violations, "Room invariants violated after move");
            }
        }

        let turn = self.state.turn();
        let result = MoveResult {
            x: placement.x,
            y: placement.y,
            letter: placement.letter,
            player_key: placement.seat,
            sequences: resolution.sequences,
            current_player: turn.current(),
            scores: turn.scores(),
            extra_turn: turn.extra_turn(),
            game_over: turn.is_over(),
            filled_cells: self.state.board().filled(),
        };

        info!(
            x = result.x,
            y = result.y,
            letter = %result.letter,
            seat = %result.player_key,
            scored = resolution.outcome.score_delta,
            next = %result.current_player,
            "Move accepted"
        );
        if result.game_over {
            info!(board = %self.state.board().display(), "Game over");
        }

        self.outbound.send_to_all(RoomEvent::MoveResult(result.clone()));
        Ok(result)
    }

    /// Full replicated state.
    pub fn snapshot(&self) -> StateSnapshot {
        let config = self.state.config();
        let turn = self.state.turn();
        StateSnapshot {
            grid_size_x: *config.width(),
            grid_size_y: *config.height(),
            game_mode: *config.mode(),
            target_word: config.target_word().clone(),
            current_player: turn.current(),
            extra_turn: turn.extra_turn(),
            game_over: turn.is_over(),
            filled_cells: self.state.board().filled(),
            player_count: self.present.len(),
            scores: turn.scores(),
            cells: self.state.board().cells().iter().map(CellView::from).collect(),
        }
    }
}
