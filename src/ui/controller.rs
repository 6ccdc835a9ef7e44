//! Game controller: the only owner of game state in the UI.
//!
//! Each frame the controller derives props for the grid, status line and
//! history list from its [`GameState`]. Input either arrives as key presses
//! handled here or as clicks translated into [`Msg`] values by components.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use super::component::{Component, Msg};
use super::grid::{GRID_HEIGHT, GRID_WIDTH, GridView};
use super::move_list::MoveList;
use crate::game::{
    Direction, GameState, GameStatus, HistoryError, PlaceOutcome, Position, winning_line,
};

const HELP: &str = "Arrows/Enter or 1-9: move | Tab: history | [ ]: step | R: restart | Q: quit";

/// Which pane receives arrow keys and Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The 3x3 grid.
    #[default]
    Grid,
    /// The history list.
    History,
}

impl Focus {
    /// The other pane.
    pub fn toggle(self) -> Self {
        match self {
            Focus::Grid => Focus::History,
            Focus::History => Focus::Grid,
        }
    }
}

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Screen regions, derived from the terminal size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title bar.
    pub title: Rect,
    /// Bordered pane around the grid.
    pub board: Rect,
    /// The grid itself.
    pub grid: Rect,
    /// Status line box.
    pub status: Rect,
    /// History list box.
    pub history: Rect,
    /// Key help footer.
    pub help: Rect,
}

impl ScreenLayout {
    /// Splits `area` into the game's regions.
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let body = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Length(GRID_WIDTH + 4), Constraint::Min(0)])
            .split(rows[1]);

        let info = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(body[1]);

        let board_inner = Block::default().borders(Borders::ALL).inner(body[0]);
        let grid = Rect::new(
            board_inner.x.saturating_add(1),
            board_inner.y,
            GRID_WIDTH,
            GRID_HEIGHT,
        )
        .intersection(board_inner);

        Self {
            title: rows[0],
            board: body[0],
            grid,
            status: info[0],
            history: info[1],
            help: rows[2],
        }
    }
}

/// Top-level controller holding history, current step and UI focus.
#[derive(Debug, Getters)]
pub struct GameController {
    state: GameState,
    cursor: Position,
    focus: Focus,
    /// Keyboard selection in the history list.
    selected: usize,
    show_coordinates: bool,
}

impl GameController {
    /// Creates a controller for a fresh game.
    #[instrument]
    pub fn new(show_coordinates: bool) -> Self {
        Self {
            state: GameState::new(),
            cursor: Position::Center,
            focus: Focus::Grid,
            selected: 0,
            show_coordinates,
        }
    }

    /// Places the next player's mark at board index `pos`.
    #[instrument(skip(self))]
    pub fn place_mark(&mut self, pos: Position) -> PlaceOutcome {
        let outcome = self.state.place_mark(pos);
        if outcome == PlaceOutcome::Placed {
            self.selected = self.state.step();
            if let GameStatus::Winner(player) = self.state.status() {
                info!(%player, "Game won");
            }
        }
        debug!(?outcome, "Placement handled");
        outcome
    }

    /// Time travels to `step`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if `step` has not been played.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), HistoryError> {
        self.state.jump_to(step)?;
        self.selected = step;
        Ok(())
    }

    /// Throws the whole history away and starts over.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.state = GameState::new();
        self.selected = 0;
        self.focus = Focus::Grid;
    }

    /// Applies a message sent up by a component.
    ///
    /// Rejected placements and out-of-range jumps are ignored.
    #[instrument(skip(self))]
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::PlaceMark(pos) => {
                self.cursor = pos;
                self.place_mark(pos);
            }
            Msg::JumpTo(step) => {
                if let Err(e) = self.jump_to(step) {
                    warn!(error = %e, "Ignoring jump");
                }
            }
        }
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                self.selected = self.state.step();
            }
            KeyCode::Char('[') => {
                if let Some(step) = self.state.step().checked_sub(1) {
                    self.update(Msg::JumpTo(step));
                }
            }
            KeyCode::Char(']') => {
                if self.state.step() < self.state.last_step() {
                    self.update(Msg::JumpTo(self.state.step() + 1));
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(pos) = Position::from_index(index) {
                    self.update(Msg::PlaceMark(pos));
                }
            }
            code => match self.focus {
                Focus::Grid => self.handle_grid_key(code),
                Focus::History => self.handle_history_key(code),
            },
        }
        Flow::Continue
    }

    fn handle_grid_key(&mut self, code: KeyCode) {
        let direction = match code {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.update(Msg::PlaceMark(self.cursor));
                return;
            }
            _ => return,
        };
        self.cursor = self.cursor.step(direction);
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        let last = self.state.last_step();
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(last),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::Enter | KeyCode::Char(' ') => self.update(Msg::JumpTo(self.selected)),
            _ => {}
        }
    }

    /// Handles a mouse event against the layout for `area`.
    #[instrument(skip(self), fields(column = mouse.column, row = mouse.row))]
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let layout = ScreenLayout::new(area);
        let clicked = self
            .grid_view()
            .on_click(layout.grid, mouse.column, mouse.row)
            .map(|msg| (Focus::Grid, msg))
            .or_else(|| {
                self.move_list()
                    .on_click(layout.history, mouse.column, mouse.row)
                    .map(|msg| (Focus::History, msg))
            });

        if let Some((focus, msg)) = clicked {
            debug!(?msg, "Click translated");
            self.focus = focus;
            self.update(msg);
        }
    }

    fn grid_view(&self) -> GridView<'_> {
        let board = self.state.current().board();
        GridView::new(board)
            .cursor((self.focus == Focus::Grid).then_some(self.cursor))
            .winning(winning_line(board).map(|(_, line)| line))
    }

    fn move_list(&self) -> MoveList<'_> {
        MoveList::new(self.state.history(), self.state.step(), self.show_coordinates)
            .selected((self.focus == Focus::History).then_some(self.selected))
    }

    /// Draws the full screen.
    pub fn render(&self, frame: &mut Frame) {
        let layout = ScreenLayout::new(frame.area());

        let title = Paragraph::new("Tic-Tac-Toe")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, layout.title);

        frame.render_widget(
            Block::default().borders(Borders::ALL).title("Board"),
            layout.board,
        );
        self.grid_view().render(layout.grid, frame.buffer_mut());

        let status = self.state.status();
        let status_style = match status {
            GameStatus::Winner(_) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            GameStatus::NextPlayer(_) => Style::default().fg(Color::Yellow),
        };
        let status = Paragraph::new(status.to_string())
            .style(status_style)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, layout.status);

        self.move_list().render(layout.history, frame.buffer_mut());

        let help = Paragraph::new(HELP)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(help, layout.help);
    }
}
