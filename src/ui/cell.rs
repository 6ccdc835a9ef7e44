//! A single grid square.

use derive_new::new;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::component::{Component, Msg, hit};
use crate::game::{Player, Position, Square};

/// Props for one square of the grid.
#[derive(Debug, Clone, Copy, new)]
pub struct CellView {
    position: Position,
    square: Square,
    /// Keyboard cursor is on this square.
    focused: bool,
    /// Square belongs to the winning line.
    winning: bool,
}

impl CellView {
    fn mark_style(&self) -> Style {
        let style = match self.square {
            Square::Empty => Style::default().fg(Color::DarkGray),
            Square::Occupied(Player::X) => Style::default().fg(Color::Blue),
            Square::Occupied(Player::O) => Style::default().fg(Color::Red),
        }
        .add_modifier(Modifier::BOLD);

        if self.winning { style.fg(Color::Green) } else { style }
    }

    fn border_style(&self) -> Style {
        if self.focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }
}

impl Component for CellView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.square.symbol())
            .style(self.mark_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style()),
            )
            .render(area, buf);
    }

    fn on_click(&self, area: Rect, column: u16, row: u16) -> Option<Msg> {
        hit(area, column, row).then_some(Msg::PlaceMark(self.position))
    }
}
