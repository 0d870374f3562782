//! Cell addressing.

use super::types::Board;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// One of the nine cells, numbered 0-8 row by row from the top left.
///
/// Clients address cells by raw index. Converting that index into a
/// `Position` is the single place where out-of-range cells are caught, so
/// everything downstream can index the board without bounds checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[repr(u8)]
pub enum Position {
    /// Cell 0.
    TopLeft = 0,
    /// Cell 1.
    TopCenter = 1,
    /// Cell 2.
    TopRight = 2,
    /// Cell 3.
    MiddleLeft = 3,
    /// The only cell on four lines.
    Center = 4,
    /// Cell 5.
    MiddleRight = 5,
    /// Cell 6.
    BottomLeft = 6,
    /// Cell 7.
    BottomCenter = 7,
    /// Cell 8.
    BottomRight = 8,
}

impl Position {
    /// Every cell, in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Index into the flat board.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column, 0 on the left.
    pub fn column(self) -> usize {
        self.to_index() % 3
    }

    /// The cell at `index`, if it is on the board.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The cell a client asked for. Negative numbers and anything past 8
    /// yield `None`.
    #[instrument]
    pub fn from_cell(cell: i64) -> Option<Self> {
        usize::try_from(cell).ok().and_then(Self::from_index)
    }

    /// Cells still open on `board`, in index order.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Position::iter().filter(|pos| board.is_empty(*pos)).collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cell {} (row {}, column {})",
            self.to_index(),
            self.row() + 1,
            self.column() + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Square};

    #[test]
    fn test_row_and_column() {
        assert_eq!((Position::TopRight.row(), Position::TopRight.column()), (0, 2));
        assert_eq!((Position::Center.row(), Position::Center.column()), (1, 1));
        assert_eq!((Position::BottomLeft.row(), Position::BottomLeft.column()), (2, 0));
    }

    #[test]
    fn test_from_cell_bounds() {
        assert_eq!(Position::from_cell(0), Some(Position::TopLeft));
        assert_eq!(Position::from_cell(8), Some(Position::BottomRight));
        assert_eq!(Position::from_cell(9), None);
        assert_eq!(Position::from_cell(-1), None);
        assert_eq!(Position::from_cell(i64::MIN), None);
    }

    #[test]
    fn test_valid_moves_skips_marked_cells() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        let open = Position::valid_moves(&board);
        assert_eq!(open.len(), 8);
        assert!(!open.contains(&Position::Center));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::MiddleRight.to_string(), "cell 5 (row 2, column 3)");
    }
}
