//! Moves and why they fail.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A mark someone wants to put down. Nothing changes until
/// [`Game::place`](crate::Game::place) accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Whose mark.
    pub player: Player,
    /// Target cell.
    pub position: Position,
}

impl Move {
    /// Pairs a mark with a cell.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.player, self.position)
    }
}

/// Reasons [`Game::place`](crate::Game::place) refuses a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The target cell already holds a mark.
    #[display("{} is taken", _0)]
    SquareOccupied(Position),

    /// Someone already won, or the board is full.
    #[display("The game has ended")]
    GameOver,

    /// The mark does not belong to the player on turn.
    #[display("{} moved out of turn", _0)]
    WrongPlayer(Player),
}

impl std::error::Error for MoveError {}
