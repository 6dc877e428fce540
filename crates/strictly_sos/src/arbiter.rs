//! Scoring, turn order and the terminal condition.

use crate::board::Board;
use crate::detector::Sequence;
use crate::types::Seat;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Phase of a room's game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    #[default]
    Active,
    /// The board is full. Permanent.
    GameOver,
}

/// Points per seat. Both start at zero whether or not the seat is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Score of the first seat.
    pub player1: u32,
    /// Score of the second seat.
    pub player2: u32,
}

impl Scores {
    /// Score of `seat`.
    pub fn get(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player1 => self.player1,
            Seat::Player2 => self.player2,
        }
    }

    fn add(&mut self, seat: Seat, points: u32) {
        let slot = match seat {
            Seat::Player1 => &mut self.player1,
            Seat::Player2 => &mut self.player2,
        };
        *slot = slot.saturating_add(points);
    }
}

/// What one move did to the turn state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Points the mover gained.
    pub score_delta: u32,
    /// Whether the mover moves again.
    pub extra_turn: bool,
    /// Whether this move ended the game.
    pub game_over: bool,
}

/// Decides score, turn and terminal state after each accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnArbiter {
    current: Seat,
    extra_turn: bool,
    phase: Phase,
    scores: Scores,
}

impl TurnArbiter {
    /// Fresh arbiter: `Player1` to move, no scores.
    pub fn new() -> Self {
        Self {
            current: Seat::Player1,
            extra_turn: false,
            phase: Phase::Active,
            scores: Scores::default(),
        }
    }

    /// Seat allowed to move next.
    pub fn current(&self) -> Seat {
        self.current
    }

    /// Whether the previous move scored.
    pub fn extra_turn(&self) -> bool {
        self.extra_turn
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Both seats' scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Applies a move by `seat` that completed `sequences`, on a `board`
    /// that already holds the placed letter.
    ///
    /// Scoring keeps the turn; a blank move passes it. The game ends only
    /// when the board fills, regardless of score.
    #[instrument(skip(self, sequences, board), fields(found = sequences.len(), filled = board.filled()))]
    pub fn apply_move(&mut self, seat: Seat, sequences: &[Sequence], board: &Board) -> MoveOutcome {
        let score_delta = u32::try_from(sequences.len()).unwrap_or(u32::MAX);
        self.scores.add(seat, score_delta);

        self.extra_turn = score_delta > 0;
        if !self.extra_turn {
            self.current = self.current.other();
        }

        if board.is_full() {
            self.phase = Phase::GameOver;
            info!(
                player1 = self.scores.player1,
                player2 = self.scores.player2,
                "Board full, game over"
            );
        }

        MoveOutcome {
            score_delta,
            extra_turn: self.extra_turn,
            game_over: self.is_over(),
        }
    }
}

impl Default for TurnArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Letter};

    fn run() -> Sequence {
        Sequence([Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)])
    }

    #[test]
    fn test_blank_move_passes_turn() {
        let board = Board::new(3, 3);
        let mut arbiter = TurnArbiter::new();
        let outcome = arbiter.apply_move(Seat::Player1, &[], &board);
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.extra_turn);
        assert_eq!(arbiter.current(), Seat::Player2);
        assert_eq!(arbiter.phase(), Phase::Active);
    }

    #[test]
    fn test_scoring_move_keeps_turn() {
        let board = Board::new(3, 3);
        let mut arbiter = TurnArbiter::new();
        let outcome = arbiter.apply_move(Seat::Player1, &[run(), run()], &board);
        assert_eq!(outcome.score_delta, 2);
        assert!(arbiter.extra_turn());
        assert_eq!(arbiter.current(), Seat::Player1);
        assert_eq!(arbiter.scores().get(Seat::Player1), 2);
        assert_eq!(arbiter.scores().get(Seat::Player2), 0);
    }

    #[test]
    fn test_extra_turn_clears_after_blank_move() {
        let board = Board::new(3, 3);
        let mut arbiter = TurnArbiter::new();
        arbiter.apply_move(Seat::Player1, &[run()], &board);
        arbiter.apply_move(Seat::Player1, &[], &board);
        assert!(!arbiter.extra_turn());
        assert_eq!(arbiter.current(), Seat::Player2);
    }

    #[test]
    fn test_full_board_ends_game() {
        let mut board = Board::new(1, 1);
        board.place_letter(0, 0, Letter::S, Seat::Player1).unwrap();
        let mut arbiter = TurnArbiter::new();
        let outcome = arbiter.apply_move(Seat::Player1, &[], &board);
        assert!(outcome.game_over);
        assert!(arbiter.is_over());
        // The turn still flips on the final blank move.
        assert_eq!(arbiter.current(), Seat::Player2);
    }
}
