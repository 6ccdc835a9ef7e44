//! Tic-tac-toe game logic: board types, win detection and move history.

mod history;
mod position;
pub mod rules;
mod types;

pub use history::{GameState, GameStatus, HistoryEntry, HistoryError, PlaceOutcome};
pub use position::{Direction, MoveCoordinates, Position};
pub use rules::{check_winner, winning_line};
pub use types::{Board, Player, Square};
