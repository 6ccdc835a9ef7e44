//! Move history and time travel.
//!
//! [`GameState`] keeps every board the game has passed through. The current
//! step points into that list; moving the pointer back is "time travel", and
//! placing a mark from an earlier step discards the abandoned future.

use super::position::{MoveCoordinates, Position};
use super::rules::check_winner;
use super::types::{Board, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One recorded board snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    board: Board,
    coordinates: Option<MoveCoordinates>,
}

impl HistoryEntry {
    /// The entry every game starts from: an empty board, no move.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            coordinates: None,
        }
    }

    fn after_move(board: Board, pos: Position) -> Self {
        Self {
            board,
            coordinates: Some(pos.coordinates()),
        }
    }

    /// Board as it stood at this step.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Where the mark leading to this board was placed.
    pub fn coordinates(&self) -> Option<MoveCoordinates> {
        self.coordinates
    }
}

/// What happened to a requested placement.
///
/// Rejections are ordinary outcomes; callers that only care about
/// successful moves can ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceOutcome {
    /// The mark was placed and recorded.
    Placed,
    /// The target square already holds a mark.
    Occupied,
    /// The current board already has a winner.
    GameOver,
}

/// Status line shown above the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GameStatus {
    /// Someone has three in a row on the current board.
    #[display("Winner: {_0}")]
    Winner(Player),
    /// No winner yet; this player moves next.
    #[display("Next player: {_0}")]
    NextPlayer(Player),
}

/// Error returned when a step or a recorded history is not consistent.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum HistoryError {
    /// The requested step has not been played.
    #[display("step {step} is out of range, last recorded step is {last}")]
    StepOutOfRange {
        /// Requested step.
        step: usize,
        /// Highest valid step.
        last: usize,
    },
    /// A recorded game with no entries at all.
    #[display("history is empty")]
    EmptyHistory,
    /// The first entry is not the empty board without a move.
    #[display("history does not start from the empty board")]
    NotFromEmptyBoard,
    /// The turn flag disagrees with the parity of the step.
    #[display("x_is_next = {x_is_next} does not match step {step}")]
    TurnMismatch {
        /// Recorded step.
        step: usize,
        /// Recorded turn flag.
        x_is_next: bool,
    },
}

/// Complete game state: history, current step, and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordedGame")]
pub struct GameState {
    history: Vec<HistoryEntry>,
    step: usize,
    x_is_next: bool,
}

/// Serialized shape of a [`GameState`], checked before it becomes one.
#[derive(Deserialize)]
struct RecordedGame {
    history: Vec<HistoryEntry>,
    step: usize,
    x_is_next: bool,
}

impl TryFrom<RecordedGame> for GameState {
    type Error = HistoryError;

    fn try_from(recorded: RecordedGame) -> Result<Self, Self::Error> {
        let RecordedGame {
            history,
            step,
            x_is_next,
        } = recorded;

        match history.first() {
            None => return Err(HistoryError::EmptyHistory),
            Some(first) if *first != HistoryEntry::initial() => {
                return Err(HistoryError::NotFromEmptyBoard);
            }
            Some(_) => {}
        }
        if step >= history.len() {
            return Err(HistoryError::StepOutOfRange {
                step,
                last: history.len() - 1,
            });
        }
        if x_is_next != (Player::for_step(step) == Player::X) {
            return Err(HistoryError::TurnMismatch { step, x_is_next });
        }

        Ok(Self {
            history,
            step,
            x_is_next,
        })
    }
}

impl GameState {
    /// Creates a new game at the empty board with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: vec![HistoryEntry::initial()],
            step: 0,
            x_is_next: true,
        }
    }

    /// Every recorded entry, oldest first. Never empty.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Index of the entry currently shown.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Index of the newest recorded entry.
    pub fn last_step(&self) -> usize {
        self.history.len() - 1
    }

    /// Entry currently shown.
    pub fn current(&self) -> &HistoryEntry {
        &self.history[self.step]
    }

    /// True when X moves next.
    pub fn x_is_next(&self) -> bool {
        self.x_is_next
    }

    /// Player who moves next from the current step.
    pub fn next_player(&self) -> Player {
        if self.x_is_next { Player::X } else { Player::O }
    }

    /// Winner on the current board, if any.
    pub fn winner(&self) -> Option<Player> {
        check_winner(self.current().board())
    }

    /// Status for the current step.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(player) => GameStatus::Winner(player),
            None => GameStatus::NextPlayer(self.next_player()),
        }
    }

    /// Places the next player's mark at `pos`.
    ///
    /// Does nothing if the current board is already won or the square is
    /// taken. Otherwise every entry after the current step is dropped before
    /// the new board is appended.
    #[instrument(skip(self), fields(step = self.step, player = %self.next_player()))]
    pub fn place_mark(&mut self, pos: Position) -> PlaceOutcome {
        let current = self.current().board();
        if check_winner(current).is_some() {
            debug!("Board already won, ignoring placement");
            return PlaceOutcome::GameOver;
        }
        if !current.is_empty(pos) {
            debug!("Square occupied, ignoring placement");
            return PlaceOutcome::Occupied;
        }

        let board = current.with_mark(pos, self.next_player());
        let discarded = self.history.len() - (self.step + 1);
        self.history.truncate(self.step + 1);
        self.history.push(HistoryEntry::after_move(board, pos));
        self.step = self.history.len() - 1;
        self.x_is_next = !self.x_is_next;

        debug!(discarded, new_step = self.step, "Mark placed");
        PlaceOutcome::Placed
    }

    /// Moves the step pointer to `step` without touching history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::StepOutOfRange`] if `step` has not been played.
    #[instrument(skip(self), fields(from = self.step))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), HistoryError> {
        if step >= self.history.len() {
            return Err(HistoryError::StepOutOfRange {
                step,
                last: self.last_step(),
            });
        }
        self.step = step;
        self.x_is_next = Player::for_step(step) == Player::X;
        debug!(next = %self.next_player(), "Jumped through history");
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Square;
    use crate::game::Position::*;

    fn play(moves: &[Position]) -> GameState {
        let mut state = GameState::new();
        for pos in moves {
            assert_eq!(state.place_mark(*pos), PlaceOutcome::Placed);
        }
        state
    }

    #[test]
    fn test_new_game_starts_with_empty_entry() {
        let state = GameState::new();
        assert_eq!(state.history(), &[HistoryEntry::initial()]);
        assert_eq!(state.step(), 0);
        assert!(state.x_is_next());
        assert_eq!(state.status().to_string(), "Next player: X");
    }

    #[test]
    fn test_place_mark_records_coordinates() {
        let state = play(&[MiddleRight]);
        let entry = state.current();
        assert_eq!(entry.board().get(MiddleRight), Square::Occupied(Player::X));
        assert_eq!(entry.coordinates(), Some(MoveCoordinates { row: 1, col: 2 }));
        assert_eq!(state.next_player(), Player::O);
    }

    #[test]
    fn test_occupied_square_leaves_state_unchanged() {
        let mut state = play(&[TopLeft]);
        let before = state.clone();
        assert_eq!(state.place_mark(TopLeft), PlaceOutcome::Occupied);
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_after_win_is_ignored() {
        let mut state = play(&[TopLeft, MiddleLeft, TopCenter, Center, TopRight]);
        assert_eq!(state.status(), GameStatus::Winner(Player::X));
        let before = state.clone();
        assert_eq!(state.place_mark(BottomRight), PlaceOutcome::GameOver);
        assert_eq!(state, before);
    }

    #[test]
    fn test_jump_sets_parity() {
        let mut state = play(&[TopLeft, Center, BottomRight]);
        for step in 0..=3 {
            state.jump_to(step).unwrap();
            assert_eq!(state.x_is_next(), step % 2 == 0);
            assert_eq!(state.history().len(), 4);
        }
    }

    #[test]
    fn test_move_after_jump_truncates_future() {
        let mut state = play(&[TopLeft, Center, BottomRight]);
        state.jump_to(1).unwrap();
        assert_eq!(state.place_mark(BottomLeft), PlaceOutcome::Placed);
        assert_eq!(state.history().len(), 3);
        assert_eq!(state.step(), 2);
        let board = state.current().board();
        assert_eq!(board.get(BottomLeft), Square::Occupied(Player::O));
        assert!(board.is_empty(Center));
        assert!(board.is_empty(BottomRight));
    }

    #[test]
    fn test_jump_back_before_win_allows_play() {
        let mut state = play(&[TopLeft, MiddleLeft, TopCenter, Center, TopRight]);
        state.jump_to(4).unwrap();
        assert_eq!(state.winner(), None);
        assert_eq!(state.place_mark(BottomRight), PlaceOutcome::Placed);
        assert_eq!(state.history().len(), 6);
    }

    #[test]
    fn test_serialized_state_reads_back() {
        let state = play(&[TopLeft, Center]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<GameState>(&json).unwrap(), state);
    }

    #[test]
    fn test_rejects_empty_history() {
        let json = r#"{"history":[],"step":0,"x_is_next":true}"#;
        let err = serde_json::from_str::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("history is empty"));
    }

    #[test]
    fn test_rejects_step_past_history() {
        let mut value = serde_json::to_value(GameState::new()).unwrap();
        value["step"] = 3.into();
        let err = serde_json::from_value::<GameState>(value).unwrap_err();
        assert!(err.to_string().contains("step 3 is out of range"));
    }

    #[test]
    fn test_rejects_turn_flag_against_parity() {
        let mut value = serde_json::to_value(GameState::new()).unwrap();
        value["x_is_next"] = false.into();
        let err = serde_json::from_value::<GameState>(value).unwrap_err();
        assert!(err.to_string().contains("does not match step 0"));
    }

    #[test]
    fn test_rejects_history_not_starting_empty() {
        let state = play(&[Center]);
        let mut value = serde_json::to_value(&state).unwrap();
        value["history"][0] = value["history"][1].clone();
        value["step"] = 0.into();
        let err = serde_json::from_value::<GameState>(value).unwrap_err();
        assert!(err.to_string().contains("does not start from the empty board"));
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut state = play(&[Center]);
        assert_eq!(
            state.jump_to(2),
            Err(HistoryError::StepOutOfRange { step: 2, last: 1 })
        );
        assert_eq!(state.step(), 1);
    }
}
