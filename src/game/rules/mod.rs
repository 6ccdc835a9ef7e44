//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Nothing here holds state,
//! so the controller can consult them on every render.

pub mod win;

pub use win::{WINNING_LINES, check_winner, winning_line};
