//! Widgets around the listing: title bar, path line, column header, status line,
//! command bar and the help popup.
//!
//! The status line doubles as the prompt line and as the place transient messages show up.

use crate::app::AppState;
use crate::app::actions::ActionMode;
use crate::app::clipboard::TransferMode;
use crate::app::keymap::action_label;
use crate::core::{format_status, header_line, sanitize_to_exact_width};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Reverse-video title, centered and padded with `=`.
pub fn draw_title_bar(frame: &mut Frame, app: &AppState, area: Rect) {
    let filter = app.filter();
    let title = if filter.search_mode {
        format!("  Search: {}  ", filter.search_query)
    } else {
        format!("  File Manager - {}  ", app.nav().current_dir().display())
    };
    let style = app
        .config()
        .theme()
        .title_style()
        .add_modifier(Modifier::REVERSED);
    let line = center_fill(&title, area.width as usize, '=');
    frame.render_widget(Paragraph::new(Line::styled(line, style)), area);
}

pub fn draw_path_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let path = format!("Path: {}", shorten_home_path(app.nav().current_dir()));
    frame.render_widget(Paragraph::new(Line::raw(path)), area);
}

pub fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let style = app
        .config()
        .theme()
        .header_style()
        .add_modifier(Modifier::BOLD);
    let header = sanitize_to_exact_width(&header_line(), area.width as usize);
    frame.render_widget(Paragraph::new(Line::styled(header, style)), area);
}

/// Prompt, transient message or entry status, in that order of precedence.
pub fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let base = app.config().theme().status_line_style();

    if let ActionMode::Input { prompt, .. } = app.actions().mode() {
        let prompt_width = prompt.width();
        let visible = (area.width as usize).saturating_sub(prompt_width + 1);
        let (shown, cursor_offset) = input_field_view(
            app.actions().input_buffer(),
            app.actions().input_cursor_pos(),
            visible,
        );
        let line = Line::from(vec![
            Span::styled(prompt.as_str(), base.add_modifier(Modifier::BOLD)),
            Span::styled(shown, base),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        frame.set_cursor_position((
            area.x + (prompt_width + cursor_offset).min(area.width as usize) as u16,
            area.y,
        ));
        return;
    }

    if let Some(text) = app.message() {
        let line = Line::styled(text, base.add_modifier(Modifier::REVERSED));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    frame.render_widget(Paragraph::new(Line::styled(status_text(app), base)), area);
}

/// Selected entry summary plus hidden/sort/clipboard/filter state.
pub fn status_text(app: &AppState) -> String {
    let mut status = match app.nav().selected_entry() {
        Some(entry) => format_status(entry),
        None => "No files".to_string(),
    };

    let filter = app.filter();
    let sort = app.sort();
    status.push_str(&format!(
        " | Hidden: {} | Sort: {}",
        if filter.show_hidden { "ON" } else { "OFF" },
        sort.key.label()
    ));
    if sort.reverse {
        status.push_str(" (reverse)");
    }
    if !filter.search_mode && filter.is_filtering() {
        status.push_str(&format!(" | Filter: \"{}\"", filter.search_query));
    }
    if let Some(slot) = app.clipboard().slot() {
        let verb = match slot.mode {
            TransferMode::Copy => "copy",
            TransferMode::Cut => "cut",
        };
        let name = slot
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        status.push_str(&format!(" | Clipboard: {verb} '{name}'"));
    }
    status
}

/// Reverse-video list of the main function keys, taken from the active bindings.
pub fn draw_command_bar(frame: &mut Frame, app: &AppState, area: Rect) {
    let keys = app.config().keys();
    let first = |list: &[String]| list.first().cloned().unwrap_or_else(|| "-".to_string());

    let commands = [
        (first(keys.help()), "Help"),
        (first(keys.rename()), "Rename"),
        (first(keys.view()), "View"),
        (first(keys.edit()), "Edit"),
        (first(keys.copy()), "Copy"),
        (first(keys.cut()), "Move"),
        (first(keys.create_directory()), "New Dir"),
        (first(keys.delete()), "Delete"),
        (first(keys.cycle_sort()), "Sort"),
        (first(keys.quit()), "Quit"),
    ];
    let text = commands
        .iter()
        .map(|(key, label)| format!("{key}:{label}"))
        .collect::<Vec<_>>()
        .join(" | ");

    let style = app
        .config()
        .theme()
        .command_bar_style()
        .add_modifier(Modifier::REVERSED);
    let line = sanitize_to_exact_width(&text, area.width as usize);
    frame.render_widget(Paragraph::new(Line::styled(line, style)), area);
}

/// Centered popup listing every binding. Any key closes it.
pub fn draw_help(frame: &mut Frame, app: &AppState) {
    let area = frame.area();
    let key_style = Style::default().add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = app
        .keymap()
        .bindings()
        .into_iter()
        .map(|(action, keys)| {
            Line::from(vec![
                Span::styled(format!("{:<22}", keys.join(", ")), key_style),
                Span::raw(action_label(action)),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::raw(
        "Search: type to filter, Enter keeps the filter, Esc cancels",
    ));
    lines.push(Line::raw("Press any key to return..."));

    let width = lines
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .saturating_add(4) as u16;
    let height = lines.len().saturating_add(2) as u16;
    let popup = popup_area(area, width, height);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.config().theme().header_style());

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Left),
        popup,
    );
}

/// Centers a `width` x `height` rectangle inside `area`, shrinking it to fit.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

/// Centers `text` in `width` columns, filling both sides with `fill`.
/// Text wider than `width` is cut.
pub fn center_fill(text: &str, width: usize, fill: char) -> String {
    let text_width = text.width();
    if text_width >= width {
        return sanitize_to_exact_width(text, width);
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Helper function to calculate cursor offset for cursor moving
/// Handles horizontal truncation, variable width with unicode_width and clamps cursor to buffer.
fn input_field_view(input_text: &str, cursor_pos: usize, visible_width: usize) -> (&str, usize) {
    let cursor_pos = cursor_pos.min(input_text.len());
    if input_text.width() <= visible_width {
        return (input_text, input_text[..cursor_pos].width());
    }

    let mut current_w = 0;
    let mut start = 0;
    for (idx, ch) in input_text.char_indices().rev() {
        current_w += ch.width().unwrap_or(0);
        if current_w > visible_width {
            start = idx + ch.len_utf8();
            break;
        }
    }

    let cursor_offset = if cursor_pos < start {
        0
    } else {
        input_text[start..cursor_pos].width()
    };
    (&input_text[start..], cursor_offset)
}
