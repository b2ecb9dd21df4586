//! Terminal rendering and event loop for atax.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, resize) to app logic.
//!
//! The loop is single-threaded: one key is handled and the frame redrawn before the next
//! event is read. It only wakes up on its own to expire a transient message.

use crate::app::{AppState, KeypressResult};
use crate::core::proc::run_suspended;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;

/// Initializes the terminal in raw mode and alternate sceen and runs the main event loop.
///
/// Blocks until quit. Handles all input and UI rendering.
///
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop of atax: draws UI, waits for events and dispatches them to the app.
/// Returns on quit
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app))?;

    loop {
        // Sleep until the next event, or until the shown message expires.
        let ready = match app.message_remaining() {
            Some(remaining) => event::poll(remaining)?,
            None => true,
        };

        if !ready {
            if app.tick() {
                terminal.draw(|f| ui::render(f, app))?;
            }
            continue;
        }

        match event::read()? {
            // handle keypress
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_keypress(key) {
                    KeypressResult::Quit => break,
                    KeypressResult::Launch(launch) => {
                        let status = run_suspended(&launch);
                        app.report_launch(&launch, status);
                        // full clear/reset
                        terminal.clear()?;
                    }
                    KeypressResult::Continue | KeypressResult::Consumed => {}
                }
                app.tick();
                terminal.draw(|f| ui::render(f, app))?;
            }

            // handle resize
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::render(f, app))?;
            }

            _ => {}
        }
    }
    Ok(())
}
