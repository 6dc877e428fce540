//! Authoritative per-room game state.

use crate::arbiter::{MoveOutcome, TurnArbiter};
use crate::board::{Board, BoardError};
use crate::config::GameConfig;
use crate::detector::{Sequence, SequenceDetector};
use crate::validation::Placement;
use tracing::{debug, instrument};

/// Board, configuration and turn state of one room.
///
/// Only [`GameState::play`] mutates it, and only after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    turn: TurnArbiter,
}

/// Everything a single accepted placement produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Runs completed by the placement, in detection order.
    pub sequences: Vec<Sequence>,
    /// Turn and score effects.
    pub outcome: MoveOutcome,
}

impl GameState {
    /// Creates an empty board for `config` with `Player1` to move.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(*config.width(), *config.height());
        Self {
            config,
            board,
            turn: TurnArbiter::new(),
        }
    }

    /// Room configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Turn, score and phase.
    pub fn turn(&self) -> &TurnArbiter {
        &self.turn
    }

    /// Writes the letter, detects completed runs and updates the turn.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] if the placement no longer fits the board;
    /// nothing changes in that case.
    #[instrument(skip(self), fields(filled = self.board.filled()))]
    pub fn play(&mut self, placement: Placement) -> Result<Resolution, BoardError> {
        let Placement { x, y, letter, seat } = placement;
        self.board.place_letter(x, y, letter, seat)?;

        let sequences = SequenceDetector::new(&self.board, &self.config).detect(x, y, letter);
        let outcome = self.turn.apply_move(seat, &sequences, &self.board);
        debug!(?outcome, "Placement resolved");

        Ok(Resolution { sequences, outcome })
    }
}
