//! Tests for tic-tac-toe positions.

use time_travel_tictactoe::{Board, Direction, Player, Position, Square};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(5), Some(Position::MiddleRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_row_major_layout() {
    for (i, pos) in Position::ALL.iter().enumerate() {
        assert_eq!(pos.row(), i / 3);
        assert_eq!(pos.col(), i % 3);
    }
}

#[test]
fn test_set_occupies_only_the_given_square() {
    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Occupied(Player::X));
    board.set(Position::Center, Square::Occupied(Player::O));

    let empty: Vec<_> = Position::ALL.into_iter().filter(|p| board.is_empty(*p)).collect();
    assert_eq!(empty.len(), 7);
    assert!(!empty.contains(&Position::TopLeft));
    assert!(!empty.contains(&Position::Center));
    assert_eq!(board.get(Position::Center).player(), Some(Player::O));
}

#[test]
fn test_cursor_walks_around_the_grid() {
    let path = [Direction::Right, Direction::Right, Direction::Down, Direction::Down];
    let end = path.iter().fold(Position::TopLeft, |pos, dir| pos.step(*dir));
    assert_eq!(end, Position::BottomRight);
}
