//! Crossline tic-tac-toe rules.
//!
//! Pure game logic with no I/O: the board, turn order, move validation and
//! win/draw detection. The matchmaking server in `crossline_server` is the
//! only consumer, but nothing here knows about connections or players'
//! names.
//!
//! # Example
//!
//! ```
//! use crossline_tictactoe::{Game, GameStatus, Move, Player, Position};
//!
//! let mut game = Game::new();
//! for cell in [0, 4, 1, 8, 2] {
//!     let mv = Move::new(game.current_turn(), Position::from_index(cell).unwrap());
//!     game.place(mv).unwrap();
//! }
//! assert_eq!(
//!     game.status(),
//!     &GameStatus::Won { winner: Player::X, line: [0, 1, 2] }
//! );
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{Game, GameStatus};
pub use position::Position;
pub use rules::{Evaluation, check_winner, evaluate};
pub use types::{Board, Player, Square, SquareParseError};

/// Alias for clarity in seat management.
pub type Mark = Player;
