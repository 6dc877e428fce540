//! Seat bookkeeping: which connection plays which seat.

use crate::types::{Seat, SessionId};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Maps connection identities to the two seats.
///
/// Seats stick to a connection for as long as it stays joined. Releasing a
/// seat never renumbers the remaining holder.
#[derive(Debug, Clone, Default)]
pub struct SeatRegistry {
    seats: HashMap<SessionId, Seat>,
}

impl SeatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a seat to `identity`:
    ///
    /// 1. nobody seated: `Player1`
    /// 2. `Player2` free: `Player2`
    /// 3. otherwise `Player1`, taken over from whoever held it.
    #[instrument(skip(self))]
    pub fn assign(&mut self, identity: &str) -> Seat {
        let seat = if self.seats.is_empty() {
            Seat::Player1
        } else if self.holder_of(Seat::Player2).is_none() {
            Seat::Player2
        } else {
            if let Some(previous) = self.holder_of(Seat::Player1).map(str::to_string) {
                warn!(previous = %previous, "Reassigning player1 to new connection");
                self.seats.remove(&previous);
            }
            Seat::Player1
        };

        self.seats.insert(identity.to_string(), seat);
        info!(seat = %seat, "Seat assigned");
        seat
    }

    /// Drops the mapping for `identity`, returning the seat it held.
    #[instrument(skip(self))]
    pub fn release(&mut self, identity: &str) -> Option<Seat> {
        let released = self.seats.remove(identity);
        debug!(?released, "Seat released");
        released
    }

    /// Returns the seat held by `identity`.
    pub fn seat_of(&self, identity: &str) -> Option<Seat> {
        self.seats.get(identity).copied()
    }

    /// Returns the identity currently holding `seat`.
    pub fn holder_of(&self, seat: Seat) -> Option<&str> {
        self.seats
            .iter()
            .find(|(_, held)| **held == seat)
            .map(|(identity, _)| identity.as_str())
    }

    /// Number of seated identities.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Returns true when nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
