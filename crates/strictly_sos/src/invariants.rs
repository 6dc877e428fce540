//! Board-level properties re-checked after every accepted move.
//!
//! The room runs [`RoomInvariants`] in debug builds and logs any violation;
//! tests call [`InvariantSet::check_all`] directly.

use crate::state::GameState;

/// A property of `S` that every reachable state satisfies.
pub trait Invariant<S> {
    /// Short name used in violation reports.
    const NAME: &'static str;

    /// Returns false if `state` breaks the property.
    fn holds(state: &S) -> bool;
}

/// A failed invariant, identified by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {}", invariant)]
pub struct InvariantViolation {
    /// [`Invariant::NAME`] of the failed check.
    pub invariant: &'static str,
}

fn violated<S, I: Invariant<S>>(state: &S) -> Option<InvariantViolation> {
    (!I::holds(state)).then_some(InvariantViolation { invariant: I::NAME })
}

/// Several invariants checked as one, reporting every failure.
pub trait InvariantSet<S> {
    /// Failed invariants, in declaration order.
    fn violations(state: &S) -> Vec<InvariantViolation>;

    /// `Ok` when nothing failed.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations = Self::violations(state);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

macro_rules! invariant_tuple {
    ($($inv:ident),+) => {
        impl<S, $($inv: Invariant<S>),+> InvariantSet<S> for ($($inv,)+) {
            fn violations(state: &S) -> Vec<InvariantViolation> {
                [$(violated::<S, $inv>(state)),+].into_iter().flatten().collect()
            }
        }
    };
}

invariant_tuple!(A, B);
invariant_tuple!(A, B, C);

/// The filled counter equals the number of cells holding a letter.
pub struct FilledCountInvariant;

impl Invariant<GameState> for FilledCountInvariant {
    const NAME: &'static str = "filled count matches occupied cells";

    fn holds(state: &GameState) -> bool {
        let board = state.board();
        board.cells().iter().filter(|cell| !cell.is_empty()).count() == board.filled()
    }
}

/// A cell has an owner exactly when it has a letter.
pub struct OwnershipInvariant;

impl Invariant<GameState> for OwnershipInvariant {
    const NAME: &'static str = "a cell has an owner iff it has a letter";

    fn holds(state: &GameState) -> bool {
        state
            .board()
            .cells()
            .iter()
            .all(|cell| cell.letter().is_some() == cell.owner().is_some())
    }
}

/// The game is over exactly when the board is full.
pub struct TerminalInvariant;

impl Invariant<GameState> for TerminalInvariant {
    const NAME: &'static str = "game over iff the board is full";

    fn holds(state: &GameState) -> bool {
        state.turn().is_over() == state.board().is_full()
    }
}

/// Everything the room checks after a move.
pub type RoomInvariants = (FilledCountInvariant, OwnershipInvariant, TerminalInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoomOptions;
    use crate::types::{Letter, Seat};
    use crate::validation::Placement;

    fn tiny_state() -> GameState {
        let config = RoomOptions {
            grid_size_x: Some(2),
            grid_size_y: Some(1),
            ..RoomOptions::default()
        }
        .resolve()
        .unwrap();
        GameState::new(config)
    }

    #[test]
    fn test_invariants_hold_for_new_state() {
        assert!(RoomInvariants::check_all(&tiny_state()).is_ok());
    }

    #[test]
    fn test_invariants_hold_through_terminal_move() {
        let mut state = tiny_state();
        for (x, seat) in [(0, Seat::Player1), (1, Seat::Player2)] {
            state
                .play(Placement {
                    x,
                    y: 0,
                    letter: Letter::O,
                    seat,
                })
                .unwrap();
            assert!(RoomInvariants::check_all(&state).is_ok());
        }
        assert!(state.turn().is_over());
    }

    struct Never;

    impl Invariant<GameState> for Never {
        const NAME: &'static str = "never holds";

        fn holds(_: &GameState) -> bool {
            false
        }
    }

    #[test]
    fn test_set_reports_each_violation() {
        let violations = <(FilledCountInvariant, Never, Never)>::check_all(&tiny_state()).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].invariant, "never holds");
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (FilledCountInvariant, OwnershipInvariant);
        assert!(TwoInvariants::check_all(&tiny_state()).is_ok());
    }
}
