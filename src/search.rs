//! Minimax search with alpha-beta pruning.
//!
//! The search is exhaustive: it runs depth-first to terminal positions
//! with no depth limit and no heuristic evaluation beyond terminal
//! utility. Tic-tac-toe is small enough (at most nine plies) that the
//! whole tree completes in negligible time, so there is no need for
//! cancellation, iterative deepening, or background execution.

use crate::position::Position;
use crate::roles::Roles;
use crate::rules;
use crate::types::{Board, Player, Square};
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Opening cells offered by the shortcut on an empty board. Center and
/// edges are deliberately not in the pool.
const OPENING_CORNERS: [Position; 4] = [
    Position::TopLeft,
    Position::TopRight,
    Position::BottomLeft,
    Position::BottomRight,
];

/// Minimax searcher bound to one game's role assignments.
///
/// The searcher holds no board state and persists nothing between
/// calls; every query operates on the snapshot it is handed. It is
/// `Copy`, so handing one to each side of a self-play loop is free.
#[derive(Debug, Clone, Copy)]
pub struct Searcher {
    roles: Roles,
    opening_shortcut: bool,
}

impl Searcher {
    /// Utility bound used to seed the alpha-beta window, strictly
    /// outside the terminal range `{-1, 0, +1}`.
    pub const INFINITY: i32 = 2;

    /// Creates a searcher for the given role bindings, with the random
    /// opening shortcut enabled.
    pub fn new(roles: Roles) -> Self {
        Self {
            roles,
            opening_shortcut: true,
        }
    }

    /// Disables the opening shortcut, making play fully deterministic.
    pub fn without_opening_shortcut(mut self) -> Self {
        self.opening_shortcut = false;
        self
    }

    /// Returns the role bindings this searcher optimizes for.
    pub fn roles(&self) -> Roles {
        self.roles
    }

    /// Terminal utility for the maximizer: `+1` if the maximizer has
    /// won, `-1` if the minimizer has, `0` otherwise.
    pub fn evaluate(&self, board: &Board) -> i32 {
        match rules::check_winner(board) {
            Some(mark) if mark == self.roles.maximizer() => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    /// Returns the optimal move for the maximizer, or `None` when the
    /// board is already terminal. Callers that need to distinguish "game
    /// over" from "move available" check terminality themselves.
    ///
    /// On a completely empty board with the shortcut enabled, one of the
    /// four corners is chosen at random instead of searching. Every
    /// opening forces at worst a draw, so the shortcut trades nothing
    /// but determinism for variety and a skipped nine-ply search.
    #[instrument(skip(self, board))]
    pub fn best_move(&self, board: &Board) -> Option<Position> {
        if rules::is_terminal(board) {
            return None;
        }

        if self.opening_shortcut && board.squares().iter().all(|s| *s == Square::Empty) {
            let corner = OPENING_CORNERS.choose(&mut rand::rng()).copied();
            debug!(corner = ?corner, "opening shortcut");
            return corner;
        }

        let mut scratch = board.clone();
        let (value, best) =
            self.search(&mut scratch, true, -Self::INFINITY, Self::INFINITY);
        debug!(value, best = ?best, "search complete");
        best
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// Legal moves are visited in ascending index order and the best
    /// value is replaced only on strict improvement, so among equally
    /// good moves the lowest index is kept. Pruning stops sibling
    /// exploration once `beta <= alpha`; it changes how much of the
    /// tree is traversed, never the returned value.
    pub fn search(
        &self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Position>) {
        if rules::is_terminal(board) {
            return (self.evaluate(board), None);
        }

        let mut best_move = None;

        if maximizing {
            let mut best = -Self::INFINITY;
            for pos in Position::valid_moves(board) {
                let value =
                    self.explore(board, pos, self.roles.maximizer(), false, alpha, beta);
                if value > best {
                    best = value;
                    best_move = Some(pos);
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        } else {
            let mut best = Self::INFINITY;
            for pos in Position::valid_moves(board) {
                let value =
                    self.explore(board, pos, self.roles.minimizer(), true, alpha, beta);
                if value < best {
                    best = value;
                    best_move = Some(pos);
                }
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        }
    }

    /// Applies `mark` at `pos`, recurses, and restores the square.
    ///
    /// Keeping the write and the restore in one scope guarantees the
    /// square is empty again on every exit path, including branches the
    /// caller prunes immediately after.
    fn explore(
        &self,
        board: &mut Board,
        pos: Position,
        mark: Player,
        maximizing: bool,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        board.set(pos, Square::Occupied(mark));
        let (value, _) = self.search(board, maximizing, alpha, beta);
        board.set(pos, Square::Empty);
        value
    }
}
