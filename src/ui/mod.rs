//! Terminal UI: component tree and event loop.

mod cell;
mod component;
mod controller;
mod grid;
mod move_list;

pub use cell::CellView;
pub use component::{Component, Msg};
pub use controller::{Flow, Focus, GameController, ScreenLayout};
pub use grid::{CELL_HEIGHT, CELL_WIDTH, GRID_HEIGHT, GRID_WIDTH, GridView, cell_areas};
pub use move_list::{MoveList, label};

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::GameConfig;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the interactive game until the user quits.
///
/// The terminal is restored even when the event loop fails.
#[instrument(skip(config))]
pub fn run_tui(config: &GameConfig) -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    let mut terminal = setup_terminal(*config.mouse()).context("Failed to set up terminal")?;
    let mut controller = GameController::new(*config.show_coordinates());

    let res = event_loop(&mut terminal, &mut controller);
    let restored =
        restore_terminal(&mut terminal, *config.mouse()).context("Failed to restore terminal");

    info!(moves = controller.state().last_step(), "TUI closed");
    settle(res, restored)
}

/// Returns the event loop's error ahead of a restore failure, logging both.
fn settle(res: Result<()>, restored: Result<()>) -> Result<()> {
    match (res, restored) {
        (Err(err), Err(restore_err)) => {
            error!(error = ?restore_err, "Terminal restore failed");
            error!(error = ?err, "Event loop error");
            Err(err)
        }
        (Err(err), Ok(())) => {
            error!(error = ?err, "Event loop error");
            Err(err)
        }
        (Ok(()), restored) => restored,
    }
}

/// Runs `undo` when `result` is an error, keeping the original error.
fn rollback_on_err<T>(result: Result<T>, undo: impl FnOnce() -> io::Result<()>) -> Result<T> {
    if result.is_err()
        && let Err(undo_err) = undo()
    {
        error!(error = ?undo_err, "Rollback after failed terminal setup also failed");
    }
    result
}

fn setup_terminal(mouse: bool) -> Result<Term> {
    enable_raw_mode()?;
    let entered = rollback_on_err(
        execute!(io::stdout(), EnterAlternateScreen).map_err(Into::into),
        disable_raw_mode,
    );
    entered?;

    let finish = || -> Result<Term> {
        let mut stdout = io::stdout();
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Ok(Terminal::new(CrosstermBackend::new(stdout))?)
    };
    rollback_on_err(finish(), || {
        execute!(io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()
    })
}

fn restore_terminal(terminal: &mut Term, mouse: bool) -> Result<()> {
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draw, wait for one event, dispatch it; repeat.
fn event_loop(terminal: &mut Term, controller: &mut GameController) -> Result<()> {
    loop {
        let area = terminal.draw(|frame| controller.render(frame))?.area;

        match event::read()? {
            // Skip key release events (crossterm fires both press and release on some platforms).
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if controller.handle_key(key) == Flow::Quit {
                    info!("User quit");
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => controller.handle_mouse(mouse, area),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn test_loop_error_wins_over_restore_error() {
        let err = settle(Err(anyhow!("read failed")), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "read failed");
    }

    #[test]
    fn test_restore_error_surfaces_after_clean_loop() {
        let err = settle(Ok(()), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_rollback_runs_only_on_failure() {
        let undone = Cell::new(false);
        let ok = rollback_on_err(Ok(7), || {
            undone.set(true);
            Ok(())
        });
        assert_eq!(ok.unwrap(), 7);
        assert!(!undone.get());

        let failed: Result<()> = rollback_on_err(Err(anyhow!("no tty")), || {
            undone.set(true);
            Err(io::Error::other("still no tty"))
        });
        assert_eq!(failed.unwrap_err().to_string(), "no tty");
        assert!(undone.get());
    }
}
