//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into its rows.
//!
//! This module stays "pure rendering": it reads state + config and produces widgets.
//! The only state it writes back is the pane height, which follows the terminal size.

use crate::app::AppState;
use crate::ui::{overlays::Overlay, panes, widgets};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Rows taken by everything except the listing: title, path, header, status and command bar.
pub const CHROME_ROWS: u16 = 5;

/// Screen areas, top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct ScreenLayout {
    pub title: Rect,
    pub path: Rect,
    pub header: Rect,
    pub pane: Rect,
    pub status: Rect,
    pub command_bar: Rect,
}

/// Render function which renders the entire terminal UI for atax on each frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let layout = screen_layout(frame.area());
    app.set_pane_height(layout.pane.height as usize);

    widgets::draw_title_bar(frame, app, layout.title);
    widgets::draw_path_line(frame, app, layout.path);
    widgets::draw_header(frame, app, layout.header);
    panes::draw_listing(frame, app, layout.pane);
    widgets::draw_status_line(frame, app, layout.status);
    widgets::draw_command_bar(frame, app, layout.command_bar);

    render_overlays(frame, app);
}

/// Splits the screen into the fixed rows around the listing pane.
/// The pane always gets at least one row.
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    ScreenLayout {
        title: chunks[0],
        path: chunks[1],
        header: chunks[2],
        pane: chunks[3],
        status: chunks[4],
        command_bar: chunks[5],
    }
}

/// Messages are part of the status line; only the help popup is drawn on top.
fn render_overlays(frame: &mut Frame, app: &AppState) {
    for overlay in app.overlays().iter() {
        if let Overlay::Help = overlay {
            widgets::draw_help(frame, app);
        }
    }
}
