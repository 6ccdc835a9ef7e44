//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position};
use tracing::instrument;

use crate::game::Position::*;

/// The eight lines that win the game, checked in this order.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [TopLeft, TopCenter, TopRight],
    [MiddleLeft, Center, MiddleRight],
    [BottomLeft, BottomCenter, BottomRight],
    // Columns
    [TopLeft, MiddleLeft, BottomLeft],
    [TopCenter, Center, BottomCenter],
    [TopRight, MiddleRight, BottomRight],
    // Diagonals
    [TopLeft, Center, BottomRight],
    [TopRight, Center, BottomLeft],
];

/// Returns the first line fully held by a single player, with that player.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, [Position; 3])> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let player = board.get(a).player()?;
        let held = board.get(b) == board.get(a) && board.get(c) == board.get(a);
        held.then_some((player, [a, b, c]))
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Square;

    fn board_with(marks: &[(Position, Player)]) -> Board {
        let mut board = Board::new();
        for (pos, player) in marks {
            board.set(*pos, Square::Occupied(*player));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[
            (TopLeft, Player::X),
            (TopCenter, Player::X),
            (TopRight, Player::X),
        ]);
        assert_eq!(check_winner(&board), Some(Player::X));
        assert_eq!(
            winning_line(&board),
            Some((Player::X, [TopLeft, TopCenter, TopRight]))
        );
    }

    #[test]
    fn test_winner_column() {
        let board = board_with(&[
            (TopRight, Player::O),
            (MiddleRight, Player::O),
            (BottomRight, Player::O),
        ]);
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[
            (TopRight, Player::O),
            (Center, Player::O),
            (BottomLeft, Player::O),
        ]);
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[
            (TopLeft, Player::X),
            (TopCenter, Player::O),
            (TopRight, Player::X),
        ]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(TopLeft, Player::X), (TopCenter, Player::X)]);
        assert_eq!(check_winner(&board), None);
    }
}
