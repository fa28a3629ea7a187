//! First-class invariants for game state.
//!
//! Invariants are logical properties that must hold throughout a game.
//! They are verified after every transition in debug builds and are
//! testable independently as documentation of system guarantees.

use crate::rules;
use crate::rules::win::LINES;
use crate::types::{Board, Player, Square};
use crate::typestate::GameInProgress;
use std::cmp::Ordering;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

/// Invariant: mark counts stay balanced under alternating play.
///
/// The two counts differ by at most one, and the mark holding more
/// squares is never the one to move.
pub struct BalancedMarks;

fn count(board: &Board, player: Player) -> usize {
    board
        .squares()
        .iter()
        .filter(|s| **s == Square::Occupied(player))
        .count()
}

impl Invariant<GameInProgress> for BalancedMarks {
    fn holds(game: &GameInProgress) -> bool {
        let x = count(game.board(), Player::X);
        let o = count(game.board(), Player::O);

        if x.abs_diff(o) > 1 {
            return false;
        }
        match x.cmp(&o) {
            Ordering::Greater => game.to_move() != Player::X,
            Ordering::Less => game.to_move() != Player::O,
            Ordering::Equal => true,
        }
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one and the leader is not to move"
    }
}

/// Invariant: no two distinct marks hold completed lines at once.
///
/// Holds for every board reachable through legal alternating play; the
/// second winning line could only appear after the game had already
/// ended.
pub struct SingleWinner;

impl Invariant<Board> for SingleWinner {
    fn holds(board: &Board) -> bool {
        let mut winner = None;

        for [a, b, c] in LINES {
            let sq = board.get(a);
            if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
                match (winner, sq) {
                    (None, Square::Occupied(player)) => winner = Some(player),
                    (Some(first), Square::Occupied(player)) if player != first => return false,
                    _ => {}
                }
            }
        }

        true
    }

    fn description() -> &'static str {
        "At most one mark holds a completed line"
    }
}

/// Invariant: an in-progress game's board is never terminal.
///
/// `make_move` transitions to the finished phase the moment a line
/// completes or the board fills, so this can only fail if a board is
/// mutated behind the lifecycle's back.
pub struct StillPlayable;

impl Invariant<GameInProgress> for StillPlayable {
    fn holds(game: &GameInProgress) -> bool {
        !rules::is_terminal(game.board())
    }

    fn description() -> &'static str {
        "An in-progress game's board is not terminal"
    }
}

/// Checks every game invariant against an in-progress game.
///
/// Returns `Ok(())` when all hold, or the list of violations.
pub fn check_all(game: &GameInProgress) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    if !BalancedMarks::holds(game) {
        violations.push(InvariantViolation {
            description: BalancedMarks::description().to_string(),
        });
    }
    if !SingleWinner::holds(game.board()) {
        violations.push(InvariantViolation {
            description: SingleWinner::description().to_string(),
        });
    }
    if !StillPlayable::holds(game) {
        violations.push(InvariantViolation {
            description: StillPlayable::description().to_string(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
