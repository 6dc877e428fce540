//! The letter grid.

use crate::types::{Cell, Letter, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Error returned by board access and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// Coordinates fall outside the grid.
    #[display("Position ({}, {}) is outside the board", x, y)]
    OutOfRange {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
    },

    /// The cell already holds a letter.
    #[display("Cell ({}, {}) is already occupied", x, y)]
    CellOccupied {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
}

/// A `width` x `height` grid of cells stored in row-major order.
///
/// `filled` always equals the number of cells holding a letter and never
/// decreases, since letters are written once and never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    filled: usize,
}

impl Board {
    /// Creates an empty board. Dimensions are validated by
    /// [`RoomOptions::resolve`](crate::RoomOptions::resolve).
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::empty(x, y)))
            .collect();
        Self {
            width,
            height,
            cells,
            filled: 0,
        }
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells holding a letter.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Returns true once every cell holds a letter.
    pub fn is_full(&self) -> bool {
        self.filled >= self.capacity()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Maps signed coordinates to a cell index, or `None` when out of range.
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns the cell at `(x, y)`.
    pub fn cell_at(&self, x: i64, y: i64) -> Result<&Cell, BoardError> {
        self.index(x, y)
            .map(|i| &self.cells[i])
            .ok_or(BoardError::OutOfRange { x, y })
    }

    /// Returns the letter at `(x, y)`, `None` for empty or out-of-range cells.
    pub fn letter_at(&self, x: i64, y: i64) -> Option<Letter> {
        self.index(x, y).and_then(|i| *self.cells[i].letter())
    }

    /// Writes `letter` for `seat` into an empty cell.
    ///
    /// This is the only way the board changes.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for coordinates off the grid, `CellOccupied` if the cell
    /// already holds a letter. The board is unchanged on error.
    #[instrument(skip(self), fields(filled = self.filled))]
    pub fn place_letter(
        &mut self,
        x: i64,
        y: i64,
        letter: Letter,
        seat: Seat,
    ) -> Result<&Cell, BoardError> {
        let index = self.index(x, y).ok_or(BoardError::OutOfRange { x, y })?;
        let cell = &mut self.cells[index];
        if !cell.is_empty() {
            return Err(BoardError::CellOccupied {
                x: *cell.x(),
                y: *cell.y(),
            });
        }

        cell.fill(letter, seat);
        self.filled += 1;
        debug!(filled = self.filled, "Letter placed");
        Ok(&self.cells[index])
    }

    /// Formats the board as text, one row per line, `.` for empty cells.
    pub fn display(&self) -> String {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.letter().map_or('.', |l| l.as_char()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
