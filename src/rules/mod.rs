//! Game rules for tic-tac-toe.
//!
//! Pure functions over board state. Rules are separated from board
//! storage so the lifecycle layer, the search, and the invariants can
//! all share one source of truth.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::check_winner;

use crate::types::Board;

/// Checks if the game is over: a line is complete or no empty square
/// remains.
pub fn is_terminal(board: &Board) -> bool {
    check_winner(board).is_some() || is_full(board)
}
