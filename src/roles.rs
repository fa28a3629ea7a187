//! Per-game role bindings for the search.

use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Binds the two search roles to marks for the duration of one game.
///
/// Which mark the engine optimizes for is decided fresh at each game
/// start, so the binding travels with the game as a value instead of
/// living in shared mutable state. Independent games can then run their
/// searches concurrently, and tests can pin either mark as maximizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roles {
    maximizer: Player,
    minimizer: Player,
}

impl Roles {
    /// Binds `maximizer` as the mark whose utility the search
    /// maximizes; the opponent minimizes it.
    pub fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            minimizer: maximizer.opponent(),
        }
    }

    /// The mark whose utility is being maximized.
    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    /// The opposing mark.
    pub fn minimizer(&self) -> Player {
        self.minimizer
    }
}
