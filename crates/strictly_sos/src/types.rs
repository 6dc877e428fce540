//! Core domain types for the SOS letter-placement game.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Identifier the transport assigns to a connected client.
pub type SessionId = String;

/// Identifier of a room instance.
pub type RoomId = String;

/// One of the two letters a player may place.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Letter {
    /// The letter `O`.
    O,
    /// The letter `S`.
    S,
}

impl Letter {
    /// Returns the letter as an uppercase character.
    pub fn as_char(self) -> char {
        match self {
            Letter::O => 'O',
            Letter::S => 'S',
        }
    }
}

/// A logical player slot, independent of which connection holds it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Seat {
    /// First seat; moves first.
    #[serde(rename = "player1")]
    #[strum(serialize = "player1")]
    Player1,
    /// Second seat.
    #[serde(rename = "player2")]
    #[strum(serialize = "player2")]
    Player2,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }
}

/// A board position as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Coord {
    /// Column, growing rightwards.
    pub x: usize,
    /// Row, growing downwards.
    pub y: usize,
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single square of the board.
///
/// Position is fixed at creation; letter and owner are written together
/// exactly once by [`Board::place_letter`](crate::Board::place_letter).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    x: usize,
    /// Row.
    y: usize,
    /// Letter placed here, if any.
    letter: Option<Letter>,
    /// Seat that placed the letter, if any.
    owner: Option<Seat>,
}

impl Cell {
    pub(crate) fn empty(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            letter: None,
            owner: None,
        }
    }

    /// Returns true if no letter has been placed here.
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }

    /// Returns the cell position.
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub(crate) fn fill(&mut self, letter: Letter, owner: Seat) {
        self.letter = Some(letter);
        self.owner = Some(owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_parse_is_case_sensitive() {
        assert_eq!("O".parse::<Letter>().ok(), Some(Letter::O));
        assert_eq!("S".parse::<Letter>().ok(), Some(Letter::S));
        assert!("o".parse::<Letter>().is_err());
        assert!("X".parse::<Letter>().is_err());
        assert!("OS".parse::<Letter>().is_err());
    }

    #[test]
    fn test_seat_keys() {
        assert_eq!(Seat::Player1.to_string(), "player1");
        assert_eq!(Seat::Player2.to_string(), "player2");
        assert_eq!(serde_json::to_string(&Seat::Player2).unwrap(), "\"player2\"");
        assert_eq!(Seat::Player1.other(), Seat::Player2);
    }
}
