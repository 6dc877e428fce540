//! Accept/reject decisions for placement requests.
//!
//! Validation is a pure function of the current state. A rejection is a
//! value, not a fault: the room drops the request without telling anyone.

use crate::board::BoardError;
use crate::state::GameState;
use crate::types::{Letter, Seat};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A `place_letter` message as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
    /// Letter symbol, expected to be exactly `"O"` or `"S"`.
    pub letter: String,
}

/// A request that passed every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Column, within the board.
    pub x: i64,
    /// Row, within the board.
    pub y: i64,
    /// Parsed letter.
    pub letter: Letter,
    /// Seat of the mover, which is the active seat.
    pub seat: Seat,
}

/// Why a placement request was dropped.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Rejection {
    /// The board is already full.
    #[display("Game is already over")]
    GameOver,

    /// The sender holds no seat.
    #[display("Connection has no seat")]
    Unseated,

    /// The sender's seat is not the active one.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Seat),

    /// Coordinates fall outside the board.
    #[display("Position ({}, {}) is outside the board", x, y)]
    OutOfRange {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
    },

    /// The letter is not one of the two symbols.
    #[display("Invalid letter {:?}", _0)]
    InvalidLetter(#[error(not(source))] String),

    /// The cell already holds a letter.
    #[display("Cell ({}, {}) is already occupied", x, y)]
    CellOccupied {
        /// Column.
        x: i64,
        /// Row.
        y: i64,
    },
}

impl From<BoardError> for Rejection {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfRange { x, y } => Rejection::OutOfRange { x, y },
            BoardError::CellOccupied { x, y } => Rejection::CellOccupied {
                x: x as i64,
                y: y as i64,
            },
        }
    }
}

/// Precondition: the game has not ended.
pub struct GameInProgress;

impl GameInProgress {
    /// Checks the phase.
    pub fn check(state: &GameState) -> Result<(), Rejection> {
        if state.turn().is_over() {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the sender is seated and it is that seat's turn.
pub struct SeatsTurn;

impl SeatsTurn {
    /// Returns the mover's seat.
    pub fn check(state: &GameState, seat: Option<Seat>) -> Result<Seat, Rejection> {
        let seat = seat.ok_or(Rejection::Unseated)?;
        if seat != state.turn().current() {
            return Err(Rejection::NotYourTurn(seat));
        }
        Ok(seat)
    }
}

/// Precondition: the coordinates address an empty cell and the letter is valid.
pub struct CellAvailable;

impl CellAvailable {
    /// Returns the parsed letter.
    pub fn check(state: &GameState, request: &PlacementRequest) -> Result<Letter, Rejection> {
        let PlacementRequest { x, y, letter } = request;
        let cell = state.board().cell_at(*x, *y)?;
        let letter: Letter = letter
            .parse()
            .map_err(|_| Rejection::InvalidLetter(letter.clone()))?;
        if !cell.is_empty() {
            return Err(Rejection::CellOccupied { x: *x, y: *y });
        }
        Ok(letter)
    }
}

/// Composite precondition, checked in order: phase, seat, turn, range,
/// letter, occupancy.
#[instrument(skip(state))]
pub fn validate_placement(
    state: &GameState,
    seat: Option<Seat>,
    request: &PlacementRequest,
) -> Result<Placement, Rejection> {
    GameInProgress::check(state)?;
    let seat = SeatsTurn::check(state, seat)?;
    let letter = CellAvailable::check(state, request)?;
    Ok(Placement {
        x: request.x,
        y: request.y,
        letter,
        seat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn request(x: i64, y: i64, letter: &str) -> PlacementRequest {
        PlacementRequest {
            x,
            y,
            letter: letter.to_string(),
        }
    }

    #[test]
    fn test_valid_request_is_accepted() {
        let state = GameState::new(GameConfig::default());
        let placement = validate_placement(&state, Some(Seat::Player1), &request(2, 3, "S")).unwrap();
        assert_eq!(placement.letter, Letter::S);
        assert_eq!(placement.seat, Seat::Player1);
    }

    #[test]
    fn test_unseated_sender_is_rejected() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(
            validate_placement(&state, None, &request(0, 0, "O")),
            Err(Rejection::Unseated)
        );
    }

    #[test]
    fn test_wrong_turn_is_rejected() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(
            validate_placement(&state, Some(Seat::Player2), &request(0, 0, "O")),
            Err(Rejection::NotYourTurn(Seat::Player2))
        );
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let state = GameState::new(GameConfig::default());
        for (x, y) in [(-1, 0), (6, 0), (0, 6), (0, -4)] {
            assert_eq!(
                validate_placement(&state, Some(Seat::Player1), &request(x, y, "O")),
                Err(Rejection::OutOfRange { x, y })
            );
        }
    }

    #[test]
    fn test_invalid_letter_is_rejected() {
        let state = GameState::new(GameConfig::default());
        for letter in ["o", "X", "", "OS"] {
            assert!(matches!(
                validate_placement(&state, Some(Seat::Player1), &request(0, 0, letter)),
                Err(Rejection::InvalidLetter(_))
            ));
        }
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut state = GameState::new(GameConfig::default());
        let placement = validate_placement(&state, Some(Seat::Player1), &request(0, 0, "O")).unwrap();
        state.play(placement).unwrap();
        assert_eq!(
            validate_placement(&state, Some(Seat::Player2), &request(0, 0, "S")),
            Err(Rejection::CellOccupied { x: 0, y: 0 })
        );
    }
}
