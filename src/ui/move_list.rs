//! History navigation: one button per recorded step.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::component::{Component, Msg, hit};
use crate::game::HistoryEntry;

/// Props for the history list.
#[derive(Debug, Clone, Copy)]
pub struct MoveList<'a> {
    history: &'a [HistoryEntry],
    current_step: usize,
    selected: Option<usize>,
    show_coordinates: bool,
    focused: bool,
}

impl<'a> MoveList<'a> {
    /// List over `history`, highlighting `current_step`.
    pub fn new(history: &'a [HistoryEntry], current_step: usize, show_coordinates: bool) -> Self {
        Self {
            history,
            current_step,
            selected: None,
            show_coordinates,
            focused: false,
        }
    }

    /// Marks `step` as the keyboard selection and gives the list focus.
    pub fn selected(mut self, step: Option<usize>) -> Self {
        self.selected = step;
        self.focused = step.is_some();
        self
    }

    fn block(&self) -> Block<'static> {
        let border = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("History")
    }

    /// First step visible in a list `height` rows tall.
    fn offset(&self, height: u16) -> usize {
        let anchor = self.selected.unwrap_or(self.current_step);
        let height = usize::from(height).max(1);
        (anchor + 1).saturating_sub(height)
    }

    fn line(&self, step: usize, entry: &HistoryEntry) -> Line<'static> {
        let mut style = Style::default();
        if step == self.current_step {
            style = style.bg(Color::Red).fg(Color::White);
        }
        if self.selected == Some(step) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        Line::from(Span::styled(
            format!("[ {} ]", label(step, entry, self.show_coordinates)),
            style,
        ))
    }
}

/// Button caption for history entry `step`.
pub fn label(step: usize, entry: &HistoryEntry, show_coordinates: bool) -> String {
    if step == 0 {
        return "Go to game start".to_string();
    }
    match entry.coordinates() {
        Some(coords) if show_coordinates => format!("Go to move #{step} {coords}"),
        _ => format!("Go to move #{step}"),
    }
}

impl Component for MoveList<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let offset = self.offset(inner.height);
        let rows = self
            .history
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(inner.height));
        for (y, (step, entry)) in (inner.y..).zip(rows) {
            self.line(step, entry)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }

    fn on_click(&self, area: Rect, column: u16, row: u16) -> Option<Msg> {
        let inner = self.block().inner(area);
        if !hit(inner, column, row) {
            return None;
        }
        let step = self.offset(inner.height) + usize::from(row - inner.y);
        (step < self.history.len()).then_some(Msg::JumpTo(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Position};

    fn three_moves() -> GameState {
        let mut state = GameState::new();
        state.place_mark(Position::TopLeft);
        state.place_mark(Position::Center);
        state.place_mark(Position::BottomCenter);
        state
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_labels() {
        let state = three_moves();
        let history = state.history();
        assert_eq!(label(0, &history[0], true), "Go to game start");
        assert_eq!(label(2, &history[2], true), "Go to move #2 (1, 1)");
        assert_eq!(label(3, &history[3], true), "Go to move #3 (2, 1)");
        assert_eq!(label(3, &history[3], false), "Go to move #3");
    }

    #[test]
    fn test_renders_one_button_per_entry() {
        let state = three_moves();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        MoveList::new(state.history(), state.step(), true).render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("[ Go to game start ]"));
        assert!(row_text(&buf, 4).contains("[ Go to move #3 (2, 1) ]"));
        assert_eq!(buf[(1, 4)].bg, Color::Red);
        assert_ne!(buf[(1, 1)].bg, Color::Red);
    }

    #[test]
    fn test_click_jumps_to_row() {
        let state = three_moves();
        let area = Rect::new(0, 0, 30, 6);
        let list = MoveList::new(state.history(), state.step(), true);
        assert_eq!(list.on_click(area, 3, 1), Some(Msg::JumpTo(0)));
        assert_eq!(list.on_click(area, 3, 3), Some(Msg::JumpTo(2)));
        assert_eq!(list.on_click(area, 0, 3), None);
    }

    #[test]
    fn test_scrolls_to_keep_selection_visible() {
        let state = three_moves();
        let area = Rect::new(0, 0, 30, 4);
        let list = MoveList::new(state.history(), state.step(), true);
        // Two visible rows, current step 3 at the bottom.
        assert_eq!(list.on_click(area, 3, 1), Some(Msg::JumpTo(2)));
        assert_eq!(list.on_click(area, 3, 2), Some(Msg::JumpTo(3)));
        let list = list.selected(Some(0));
        assert_eq!(list.on_click(area, 3, 1), Some(Msg::JumpTo(0)));
    }
}
