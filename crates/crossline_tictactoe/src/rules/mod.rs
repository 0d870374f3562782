//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). They hold no state and
//! never mutate the board, so the engine and the server can consult them
//! freely after every move.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Evaluation, LINES, check_winner, evaluate};
