//! Headless replay of a move sequence.

use derive_more::{Display, Error, From};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::game::{GameState, GameStatus, HistoryError, PlaceOutcome, Position};
use crate::ui::label;

/// Errors from replaying a move list.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ReplayError {
    /// A board index outside 0-8.
    #[display("move #{move_number}: index {index} is not a board square (0-8)")]
    #[from(ignore)]
    BadIndex {
        /// 1-based position of the offending move in the input.
        move_number: usize,
        /// The index given.
        index: usize,
    },
    /// The final jump targets a step that was never recorded.
    #[display("jump failed: {_0}")]
    Jump(HistoryError),
}

/// A move that did not change the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IgnoredMove {
    /// Board index that was requested.
    pub index: usize,
    /// Why it was ignored.
    pub outcome: PlaceOutcome,
}

/// Result of a replay, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Game state after every move and the optional jump.
    pub state: GameState,
    /// Status line for the current step.
    pub status: GameStatus,
    /// Moves that were occupied or came after a win.
    pub ignored: Vec<IgnoredMove>,
}

impl ReplayReport {
    /// Plain-text rendering: board, status, then the history buttons.
    pub fn to_text(&self, show_coordinates: bool) -> String {
        let mut out = format!("{}\n\n{}\n", self.state.current().board().display(), self.status);
        for (step, entry) in self.state.history().iter().enumerate() {
            let marker = if step == self.state.step() { '>' } else { ' ' };
            out.push_str(&format!("{marker} {}\n", label(step, entry, show_coordinates)));
        }
        for ignored in &self.ignored {
            out.push_str(&format!("ignored {}: {:?}\n", ignored.index, ignored.outcome));
        }
        out
    }
}

/// Places each index in turn on a fresh game, then optionally jumps to `jump`.
///
/// # Errors
///
/// Fails on an index outside 0-8 or a jump past the recorded history.
#[instrument]
pub fn replay(moves: &[usize], jump: Option<usize>) -> Result<ReplayReport, ReplayError> {
    let mut state = GameState::new();
    let mut ignored = Vec::new();

    for (i, &index) in moves.iter().enumerate() {
        let pos = Position::from_index(index).ok_or(ReplayError::BadIndex {
            move_number: i + 1,
            index,
        })?;
        let outcome = state.place_mark(pos);
        if outcome != PlaceOutcome::Placed {
            warn!(index, ?outcome, "Move ignored");
            ignored.push(IgnoredMove { index, outcome });
        }
    }

    if let Some(step) = jump {
        state.jump_to(step)?;
    }

    debug!(step = state.step(), "Replay finished");
    Ok(ReplayReport {
        status: state.status(),
        state,
        ignored,
    })
}
