//! Component trait and the messages components send upward.

use ratatui::{buffer::Buffer, layout::Rect};

use crate::game::Position;

/// A request bubbling up from a component to the controller.
///
/// Components never mutate game state; they describe what the user asked
/// for and the [`GameController`](super::GameController) applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Place the next player's mark.
    PlaceMark(Position),
    /// Time travel to a recorded step.
    JumpTo(usize),
}

/// A presentational unit built fresh from immutable props on every frame.
pub trait Component {
    /// Draws the component into `area`.
    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Translates a left click at terminal cell (`column`, `row`) into a message.
    ///
    /// `area` must be the same rectangle the component was rendered into.
    fn on_click(&self, area: Rect, column: u16, row: u16) -> Option<Msg>;
}

/// Whether the terminal cell (`column`, `row`) lies inside `area`.
pub(crate) fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.left() && column < area.right() && row >= area.top() && row < area.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_excludes_far_edges() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(hit(area, 2, 3));
        assert!(hit(area, 5, 4));
        assert!(!hit(area, 6, 4));
        assert!(!hit(area, 5, 5));
        assert!(!hit(area, 1, 3));
    }
}
