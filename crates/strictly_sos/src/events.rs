//! Messages exchanged with clients.
//!
//! Field names follow the wire protocol (camelCase).

use crate::arbiter::Scores;
use crate::config::GameMode;
use crate::detector::Sequence;
use crate::types::{Cell, Letter, RoomId, Seat, SessionId};
use crate::validation::PlacementRequest;
use serde::{Deserialize, Serialize};

/// Sent only to a joining client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    /// The client's own session id.
    pub session_id: SessionId,
    /// Seat it plays.
    pub player_key: Seat,
    /// Room it joined.
    pub room_id: RoomId,
}

/// Broadcast after every accepted placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    /// Column of the placement.
    pub x: i64,
    /// Row of the placement.
    pub y: i64,
    /// Letter placed.
    pub letter: Letter,
    /// Seat that moved.
    pub player_key: Seat,
    /// Runs completed, in detection order.
    pub sequences: Vec<Sequence>,
    /// Seat to move next.
    pub current_player: Seat,
    /// Both scores after the move.
    pub scores: Scores,
    /// Whether the mover moves again.
    pub extra_turn: bool,
    /// Whether the board is now full.
    pub game_over: bool,
    /// Cells holding a letter.
    pub filled_cells: usize,
}

/// One cell as replicated to clients. Empty fields are `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Letter or `""`.
    pub letter: String,
    /// Owning seat key or `""`.
    pub player: String,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            x: *cell.x(),
            y: *cell.y(),
            letter: cell.letter().map(|l| l.to_string()).unwrap_or_default(),
            player: cell.owner().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

/// Full room state, enough for a client to rebuild its view from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Grid width.
    pub grid_size_x: usize,
    /// Grid height.
    pub grid_size_y: usize,
    /// Direction set.
    pub game_mode: GameMode,
    /// Uppercased target word.
    pub target_word: String,
    /// Seat to move.
    pub current_player: Seat,
    /// Whether the previous move scored.
    pub extra_turn: bool,
    /// Whether the board is full.
    pub game_over: bool,
    /// Cells holding a letter.
    pub filled_cells: usize,
    /// Connected identities.
    pub player_count: usize,
    /// Both scores.
    pub scores: Scores,
    /// Every cell in row-major order.
    pub cells: Vec<CellView>,
}

/// An outbound event; serializes as `{"event": <name>, "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum RoomEvent {
    /// Seat assignment for the joining client.
    Seat(SeatAssignment),
    /// Result of an accepted placement.
    MoveResult(MoveResult),
    /// Full state snapshot.
    State(StateSnapshot),
}

impl RoomEvent {
    /// The event name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::Seat(_) => "seat",
            RoomEvent::MoveResult(_) => "move_result",
            RoomEvent::State(_) => "state",
        }
    }
}

/// An inbound client message; deserializes from `{"type": <name>, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request to place a letter.
    PlaceLetter(PlacementRequest),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;
    use serde_json::json;

    #[test]
    fn test_seat_event_shape() {
        let event = RoomEvent::Seat(SeatAssignment {
            session_id: "abc".to_string(),
            player_key: Seat::Player1,
            room_id: "room1".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "seat",
                "payload": {"sessionId": "abc", "playerKey": "player1", "roomId": "room1"}
            })
        );
    }

    #[test]
    fn test_move_result_shape() {
        let result = MoveResult {
            x: 2,
            y: 0,
            letter: Letter::O,
            player_key: Seat::Player1,
            sequences: vec![Sequence([Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)])],
            current_player: Seat::Player1,
            scores: Scores {
                player1: 1,
                player2: 0,
            },
            extra_turn: true,
            game_over: true,
            filled_cells: 3,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "x": 2,
                "y": 0,
                "letter": "O",
                "playerKey": "player1",
                "sequences": [[{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}]],
                "currentPlayer": "player1",
                "scores": {"player1": 1, "player2": 0},
                "extraTurn": true,
                "gameOver": true,
                "filledCells": 3
            })
        );
    }

    #[test]
    fn test_place_letter_message_parses() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type": "place_letter", "x": 1, "y": 4, "letter": "S"}"#).unwrap();
        assert_eq!(
            message,
            ClientMessage::PlaceLetter(PlacementRequest {
                x: 1,
                y: 4,
                letter: "S".to_string()
            })
        );
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "resign"}"#).is_err());
    }
}
