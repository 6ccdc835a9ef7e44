//! The 3x3 arrangement of cells.

use ratatui::{buffer::Buffer, layout::Rect};

use super::cell::CellView;
use super::component::{Component, Msg};
use crate::game::{Board, Position};

/// Width of one cell including its border.
pub const CELL_WIDTH: u16 = 7;
/// Height of one cell including its border.
pub const CELL_HEIGHT: u16 = 3;
/// Width of the whole grid.
pub const GRID_WIDTH: u16 = CELL_WIDTH * 3;
/// Height of the whole grid.
pub const GRID_HEIGHT: u16 = CELL_HEIGHT * 3;

/// Props for the grid: the board to show plus highlight hints.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    board: &'a Board,
    cursor: Option<Position>,
    winning: Option<[Position; 3]>,
}

impl<'a> GridView<'a> {
    /// Grid for `board` with no cursor and no highlighted line.
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            cursor: None,
            winning: None,
        }
    }

    /// Shows the keyboard cursor on `cursor`.
    pub fn cursor(mut self, cursor: Option<Position>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Highlights a completed line.
    pub fn winning(mut self, line: Option<[Position; 3]>) -> Self {
        self.winning = line;
        self
    }

    fn cell(&self, pos: Position) -> CellView {
        CellView::new(
            pos,
            self.board.get(pos),
            self.cursor == Some(pos),
            self.winning.is_some_and(|line| line.contains(&pos)),
        )
    }
}

/// Screen rectangle of each cell, indexed like the board.
///
/// Cells that fall outside `area` are clipped to it.
pub fn cell_areas(area: Rect) -> [Rect; 9] {
    std::array::from_fn(|i| {
        let (row, col) = ((i / 3) as u16, (i % 3) as u16);
        Rect::new(
            area.x.saturating_add(col * CELL_WIDTH),
            area.y.saturating_add(row * CELL_HEIGHT),
            CELL_WIDTH,
            CELL_HEIGHT,
        )
        .intersection(area)
    })
}

impl Component for GridView<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        for (pos, cell_area) in Position::ALL.into_iter().zip(cell_areas(area)) {
            if !cell_area.is_empty() {
                self.cell(pos).render(cell_area, buf);
            }
        }
    }

    fn on_click(&self, area: Rect, column: u16, row: u16) -> Option<Msg> {
        Position::ALL
            .into_iter()
            .zip(cell_areas(area))
            .find_map(|(pos, cell_area)| self.cell(pos).on_click(cell_area, column, row))
    }
}
