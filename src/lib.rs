//! Tic-tac-toe with move history and time travel.
//!
//! # Architecture
//!
//! - **Game**: board types, win detection and the [`GameState`] history
//! - **UI**: ratatui component tree ([`CellView`], [`GridView`], [`MoveList`])
//!   driven by a single [`GameController`]
//! - **Replay**: headless application of a move list
//!
//! # Example
//!
//! ```
//! use time_travel_tictactoe::{GameState, GameStatus, Player, Position};
//!
//! let mut game = GameState::new();
//! for index in [0, 3, 1, 4, 2] {
//!     game.place_mark(Position::from_index(index).unwrap());
//! }
//! assert_eq!(game.status(), GameStatus::Winner(Player::X));
//!
//! game.jump_to(2).unwrap();
//! assert!(game.x_is_next());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod game;
mod replay;
mod ui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types
pub use game::{
    Board, Direction, GameState, GameStatus, HistoryEntry, HistoryError, MoveCoordinates,
    PlaceOutcome, Player, Position, Square, check_winner, rules, winning_line,
};

// Crate-level exports - Replay
pub use replay::{IgnoredMove, ReplayError, ReplayReport, replay};

// Crate-level exports - Terminal UI
pub use ui::{
    CELL_HEIGHT, CELL_WIDTH, CellView, Component, Flow, Focus, GRID_HEIGHT, GRID_WIDTH,
    GameController, GridView, MoveList, Msg, ScreenLayout, cell_areas, label, run_tui,
};
