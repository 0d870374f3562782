//! Win detection logic for tic-tac-toe.

use super::draw::is_full;
use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// The eight winning lines, checked in this order: rows top-to-bottom,
/// columns left-to-right, then the two diagonals.
///
/// When several lines are complete at once the first one listed here is
/// reported.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// No line is complete and at least one square is empty.
    Ongoing,
    /// A line is held by one player.
    Won {
        /// The player holding the line.
        winner: Player,
        /// Board indices of the winning line.
        line: [usize; 3],
    },
    /// Every square is occupied and no line is complete.
    Draw,
}

impl Evaluation {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Evaluation::Ongoing)
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the player with three in a row together with the board indices
/// of that line, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, [usize; 3])> {
    LINES.iter().find_map(|&[a, b, c]| {
        let sq = board.get(a);
        match sq {
            Square::Occupied(player) if sq == board.get(b) && sq == board.get(c) => {
                Some((player, [a.to_index(), b.to_index(), c.to_index()]))
            }
            _ => None,
        }
    })
}

/// Evaluates a board for a winner or an exhausted (drawn) board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Evaluation {
    match check_winner(board) {
        Some((winner, line)) => Evaluation::Won { winner, line },
        None if is_full(board) => Evaluation::Draw,
        None => Evaluation::Ongoing,
    }
}
