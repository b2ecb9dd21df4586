//! UI pane drawing module for atax.
//!
//! Draws the entry listing: one row per visible entry with file type coloring and the
//! reverse-video selection.
//!
//! Used internally by ui::render

use crate::app::AppState;
use crate::config::Theme;
use crate::core::{FileEntry, format_row, sanitize_to_exact_width};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

/// Styles used for rendering entries in the pane
pub struct PaneStyles {
    pub dir: Style,
    pub symlink: Style,
    pub executable: Style,
    pub selection: Style,
}

impl PaneStyles {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            dir: theme.directory_style().add_modifier(Modifier::BOLD),
            symlink: theme.symlink_style(),
            executable: theme.executable_style(),
            selection: theme.selection_style(),
        }
    }

    /// Directory beats symlink beats executable. The selection is reversed on top of that.
    pub fn get_style(&self, entry: &FileEntry, is_selected: bool) -> Style {
        let mut style = if entry.is_dir() {
            self.dir
        } else if entry.is_symlink() {
            self.symlink
        } else if entry.is_executable() {
            self.executable
        } else {
            Style::default()
        };

        if is_selected {
            if let Some(fg) = self.selection.fg
                && fg != Color::Reset
            {
                style = style.fg(fg);
            }
            if let Some(bg) = self.selection.bg
                && bg != Color::Reset
            {
                style = style.bg(bg);
            }
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

/// Draws the rows of the scroll window `[top, top + pane_height)`.
pub fn draw_listing(frame: &mut Frame, app: &AppState, area: Rect) {
    let styles = PaneStyles::from_theme(app.config().theme());
    let width = area.width as usize;
    let selected = app.nav().selected_idx();

    let lines: Vec<Line> = app
        .nav()
        .visible()
        .take(area.height as usize)
        .map(|(idx, entry)| {
            let row = sanitize_to_exact_width(&format_row(entry), width);
            Line::styled(row, styles.get_style(entry, idx == selected))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
