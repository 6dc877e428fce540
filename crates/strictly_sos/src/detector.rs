//! Target-word sequence detection.
//!
//! After a letter lands, every straight run of three cells that passes
//! through it is checked against the target word. A direction is scanned
//! with the placed cell at each offset 0, 1 and 2 of the run, which also
//! covers the runs extending backwards from the cell. Matches are reported
//! once per (direction, offset) pair, in declaration order, without any
//! deduplication.

use crate::board::Board;
use crate::config::{GameConfig, GameMode, WORD_LENGTH};
use crate::types::{Coord, Letter};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A unit step along a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Column step.
    pub dx: i64,
    /// Row step.
    pub dy: i64,
}

impl Direction {
    /// Left to right.
    pub const HORIZONTAL: Direction = Direction { dx: 1, dy: 0 };
    /// Top to bottom.
    pub const VERTICAL: Direction = Direction { dx: 0, dy: 1 };
    /// Top-left to bottom-right.
    pub const DIAGONAL_DOWN: Direction = Direction { dx: 1, dy: 1 };
    /// Bottom-left to top-right.
    pub const DIAGONAL_UP: Direction = Direction { dx: 1, dy: -1 };

    const LINES: [Direction; 2] = [Direction::HORIZONTAL, Direction::VERTICAL];
    const ALL: [Direction; 4] = [
        Direction::HORIZONTAL,
        Direction::VERTICAL,
        Direction::DIAGONAL_DOWN,
        Direction::DIAGONAL_UP,
    ];

    /// Directions scanned in `mode`, in scan order.
    pub fn for_mode(mode: GameMode) -> &'static [Direction] {
        match mode {
            GameMode::LinesOnly => &Self::LINES,
            GameMode::AllDirections => &Self::ALL,
        }
    }
}

/// Three positions spelling the target word, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(pub [Coord; WORD_LENGTH]);

impl Sequence {
    /// The positions of the run.
    pub fn coords(&self) -> &[Coord; WORD_LENGTH] {
        &self.0
    }
}

/// Finds completed target-word runs through a freshly placed letter.
#[derive(Debug, Clone, Copy)]
pub struct SequenceDetector<'a> {
    board: &'a Board,
    config: &'a GameConfig,
}

impl<'a> SequenceDetector<'a> {
    /// Creates a detector over the current board.
    pub fn new(board: &'a Board, config: &'a GameConfig) -> Self {
        Self { board, config }
    }

    /// Returns every run through `(x, y)` that spells the target word when
    /// `(x, y)` holds `letter`.
    ///
    /// Empty when nothing matched or the configured word is not three
    /// characters long.
    #[instrument(skip(self), fields(mode = %self.config.mode()))]
    pub fn detect(&self, x: i64, y: i64, letter: Letter) -> Vec<Sequence> {
        let Some(word) = self.config.word() else {
            debug!("Detection disabled for this target word");
            return Vec::new();
        };

        let mut found = Vec::new();
        for &direction in Direction::for_mode(*self.config.mode()) {
            for offset in 0..WORD_LENGTH {
                if let Some(sequence) = self.match_run(&word, x, y, letter, direction, offset) {
                    found.push(sequence);
                }
            }
        }

        debug!(count = found.len(), "Sequences detected");
        found
    }

    /// Checks the run along `direction` whose `offset`-th cell is `(x, y)`.
    fn match_run(
        &self,
        word: &[char; WORD_LENGTH],
        x: i64,
        y: i64,
        letter: Letter,
        direction: Direction,
        offset: usize,
    ) -> Option<Sequence> {
        let start_x = x - offset as i64 * direction.dx;
        let start_y = y - offset as i64 * direction.dy;

        let mut coords = [Coord::new(0, 0); WORD_LENGTH];
        for (i, expected) in word.iter().enumerate() {
            let cx = start_x + i as i64 * direction.dx;
            let cy = start_y + i as i64 * direction.dy;
            let index = self.board.index(cx, cy)?;

            let actual = if i == offset {
                Some(letter)
            } else {
                self.board.letter_at(cx, cy)
            };
            if actual.map(Letter::as_char) != Some(*expected) {
                return None;
            }

            coords[i] = self.board.cells()[index].coord();
        }

        Some(Sequence(coords))
    }
}
