//! Typestate lifecycle for a tic-tac-toe game.
//!
//! Each phase is its own type, so invalid operations do not compile: a
//! finished game has no `make_move`, and an in-progress game has no
//! outcome. Transitions consume the current phase and return the next.

use crate::action::{Move, MoveError};
use crate::position::Position;
use crate::rules;
use crate::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Outcome
// ─────────────────────────────────────────────────────────────

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {:?} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase, ready to start. The board is always empty.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game. Either mark may open; the choice is made fresh
    /// per game, together with the search role bindings.
    #[instrument(skip(self))]
    pub fn start(self, first_player: Player) -> GameInProgress {
        GameInProgress {
            board: self.board,
            to_move: first_player,
        }
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress phase
// ─────────────────────────────────────────────────────────────

/// Game in progress, accepting moves.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) to_move: Player,
}

impl GameInProgress {
    /// Makes a move, consuming self and transitioning to the next phase.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::SquareOccupied` when the position is taken
    /// and `MoveError::WrongPlayer` when it is not the mover's turn. In
    /// debug builds the invariant set is re-verified after the
    /// transition and a violation surfaces as
    /// `MoveError::InvariantViolation`.
    #[instrument(skip(self), fields(player = ?action.player, position = ?action.position))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        if !self.board.is_empty(action.position) {
            return Err(MoveError::SquareOccupied(action.position));
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }

        let mut game = self;
        game.board
            .set(action.position, Square::Occupied(action.player));

        if rules::is_terminal(&game.board) {
            return Ok(GameResult::Finished(GameFinished { board: game.board }));
        }

        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        crate::invariants::check_all(&game).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(descriptions)
        })?;

        Ok(GameResult::InProgress(game))
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the legal positions, in ascending index order.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Drives a fresh game through the given moves.
    ///
    /// The first move's player opens (a new game with no moves starts
    /// with X). Nothing is recorded: this is a constructor convenience
    /// for tests and callers that source moves externally.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<GameResult, MoveError> {
        let first = moves.first().map_or(Player::X, |m| m.player);
        let mut game = GameSetup::new().start(first);

        for action in moves {
            match game.make_move(*action)? {
                GameResult::InProgress(next) => game = next,
                finished @ GameResult::Finished(_) => return Ok(finished),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished phase
// ─────────────────────────────────────────────────────────────

/// Game finished: no more moves, outcome determined.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
}

impl GameFinished {
    /// Returns the outcome, recomputed from the board's cells.
    ///
    /// The outcome is never stored, so it cannot drift from the board
    /// that produced it.
    pub fn outcome(&self) -> Outcome {
        match rules::check_winner(&self.board) {
            Some(winner) => Outcome::Winner(winner),
            None => Outcome::Draw,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Resets for a new game (consumes the finished game).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition result
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
