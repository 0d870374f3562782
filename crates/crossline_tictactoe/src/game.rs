//! Game engine for tic-tac-toe.

use super::action::{Move, MoveError};
use super::rules::{Evaluation, evaluate};
use super::types::{Board, Player, Square};
use super::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won {
        /// The winning player.
        winner: Player,
        /// Board indices of the winning line.
        line: [usize; 3],
    },
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl From<Evaluation> for GameStatus {
    fn from(evaluation: Evaluation) -> Self {
        match evaluation {
            Evaluation::Ongoing => GameStatus::InProgress,
            Evaluation::Won { winner, line } => GameStatus::Won { winner, line },
            Evaluation::Draw => GameStatus::Draw,
        }
    }
}

/// Tic-tac-toe game engine.
///
/// Owns the board and the turn. X always moves first, turns alternate
/// strictly after every accepted move, and once the game is won or drawn no
/// further move is accepted until [`Game::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_turn: Player,
    status: GameStatus,
    history: Vec<Position>,
}

impl Game {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the positions played so far, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Validates a move without applying it.
    pub fn check(&self, mv: &Move) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if mv.player != self.current_turn {
            return Err(MoveError::WrongPlayer(mv.player));
        }
        if !self.board.is_empty(mv.position) {
            return Err(MoveError::SquareOccupied(mv.position));
        }
        Ok(())
    }

    /// Places a mark and returns the resulting status.
    ///
    /// The turn passes to the opponent only while the game stays in
    /// progress. A rejected move leaves the game untouched.
    #[instrument(skip(self), fields(mv = %mv))]
    pub fn place(&mut self, mv: Move) -> Result<&GameStatus, MoveError> {
        self.check(&mv)?;

        self.board.set(mv.position, Square::Occupied(mv.player));
        self.history.push(mv.position);

        let evaluation = evaluate(&self.board);
        if !evaluation.is_terminal() {
            self.current_turn = self.current_turn.opponent();
        }
        self.status = evaluation.into();

        debug!(status = ?self.status, moves = self.history.len(), "Move applied");
        Ok(&self.status)
    }

    /// Clears the board and starts over with X to move.
    pub fn reset(&mut self) {
        self.board.clear();
        self.history.clear();
        self.current_turn = Player::X;
        self.status = GameStatus::InProgress;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
