//! Strictly SOS - authoritative logic for a two-seat letter-placement game
//!
//! Players take turns placing `O` or `S` on a grid. Completing the target
//! word (default `OSO`) along an enabled direction scores a point per run
//! and grants another move. The game ends when the board is full.
//!
//! # Architecture
//!
//! - **Board**: the grid and its filled-cell counter
//! - **SeatRegistry**: connection identity to seat mapping
//! - **SequenceDetector**: finds completed runs through a placed letter
//! - **TurnArbiter**: score, turn order and game over
//! - **RoomController**: orchestrates the above for join, leave and
//!   placement events and emits outbound events
//!
//! # Example
//!
//! ```
//! use strictly_sos::{Dispatch, PlacementRequest, RoomController, RoomOptions, Seat};
//!
//! let options = RoomOptions {
//!     grid_size_x: Some(3),
//!     grid_size_y: Some(1),
//!     ..RoomOptions::default()
//! };
//! let mut room = RoomController::new("room".to_string(), &options, Vec::<Dispatch>::new())?;
//! assert_eq!(room.on_join("alice"), Seat::Player1);
//!
//! let request = PlacementRequest { x: 0, y: 0, letter: "O".to_string() };
//! let result = room.on_placement_request("alice", &request).expect("alice moves first");
//! assert_eq!(result.current_player, Seat::Player2);
//! # Ok::<(), strictly_sos::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arbiter;
mod board;
mod config;
mod detector;
mod events;
mod invariants;
mod room;
mod seats;
mod state;
mod types;
mod validation;

// Crate-level exports - Domain types
pub use types::{Cell, Coord, Letter, RoomId, Seat, SessionId};

// Crate-level exports - Board
pub use board::{Board, BoardError};

// Crate-level exports - Configuration
pub use config::{
    ConfigError, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TARGET_WORD, GameConfig,
    GameMode, MAX_CELLS, RoomOptions, WORD_LENGTH,
};

// Crate-level exports - Seats
pub use seats::SeatRegistry;

// Crate-level exports - Detection and arbitration
pub use arbiter::{MoveOutcome, Phase, Scores, TurnArbiter};
pub use detector::{Direction, Sequence, SequenceDetector};

// Crate-level exports - State, validation and invariants
pub use invariants::{
    FilledCountInvariant, Invariant, InvariantSet, InvariantViolation, OwnershipInvariant,
    RoomInvariants, TerminalInvariant,
};
pub use state::{GameState, Resolution};
pub use validation::{
    CellAvailable, GameInProgress, Placement, PlacementRequest, Rejection, SeatsTurn,
    validate_placement,
};

// Crate-level exports - Room and wire events
pub use events::{
    CellView, ClientMessage, MoveResult, RoomEvent, SeatAssignment, StateSnapshot,
};
pub use room::{Dispatch, Outbound, RoomController, Target};
