//! Input action handler methods for atax.
//!
//! This module implements [AppState] methods that process key events: navigation, file
//! operations, listing presentation, search entry and the line-input prompts
//! (rename, new directory, delete confirmation).

use crate::app::actions::{ActionMode, InputMode};
use crate::app::clipboard::{PasteOutcome, TransferMode};
use crate::app::keymap::{FileAction, NavAction, SystemAction, ViewAction};
use crate::app::nav::NavState;
use crate::app::state::{AppState, KeypressResult};
use crate::core::FmError;
use crate::core::proc::prepare_launch;
use crate::ui::overlays::Overlay;

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};
use std::ffi::OsString;
use std::path::Path;

/// AppState input and action handlers
impl<'a> AppState<'a> {
    // AppState core handlers

    /// Handles keys while the search query is being typed.
    ///
    /// Printable characters extend the query, Backspace shortens it, Esc discards it and
    /// Enter keeps it as a confirmed filter. Every other key is swallowed.
    pub(super) fn handle_search_mode(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            Esc => {
                self.filter.cancel_search();
                self.refresh_listing(None);
            }
            Enter => self.filter.confirm_search(),
            Backspace => {
                self.filter.pop_char();
                self.refresh_listing(None);
            }
            Char(c) if is_plain(&key) => {
                self.filter.push_char(c);
                self.refresh_listing(None);
            }
            _ => {}
        }
        KeypressResult::Consumed
    }

    /// Handles key events when a prompt is open (rename, new directory, delete).
    /// Returns a [KeypressResult] indicating how the key event was handled.
    ///
    /// If not in an input mode, returns [KeypressResult::Continue].
    /// Consumes every other key while the prompt is open.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let Some(mode) = self.actions.input_mode() else {
            return KeypressResult::Continue;
        };

        match key.code {
            Enter => {
                match mode {
                    InputMode::Rename => self.rename_entry(),
                    InputMode::NewDirectory => self.create_directory(),
                    InputMode::ConfirmDelete => self.confirm_delete(),
                }
                self.exit_input_mode();
            }
            Esc => self.exit_input_mode(),
            Left => self.actions.action_move_cursor_left(),
            Right => self.actions.action_move_cursor_right(),
            Home => self.actions.action_cursor_home(),
            End => self.actions.action_cursor_end(),
            Backspace => self.actions.action_backspace_at_cursor(),
            Delete => self.actions.action_delete_at_cursor(),
            Char(c) if is_plain(&key) => self.actions.action_insert_at_cursor(c),
            _ => {}
        }
        KeypressResult::Consumed
    }

    /// Handles navigation actions (up, down, into dir, etc).
    /// Returns a [KeypressResult] indicating how the action was handled.
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        match action {
            NavAction::GoUp => self.move_nav(NavState::move_up),
            NavAction::GoDown => self.move_nav(NavState::move_down),
            NavAction::PageUp => self.move_nav(NavState::page_up),
            NavAction::PageDown => self.move_nav(NavState::page_down),
            NavAction::GoToTop => self.move_nav(NavState::first),
            NavAction::GoToBottom => self.move_nav(NavState::last),
            NavAction::GoParent => self.handle_go_parent(),
            NavAction::GoIntoDir => self.handle_go_into_dir(),
            NavAction::ClearFilter => self.handle_clear_filter(),
        }
    }

    /// Handles file actions (rename, view, copy, paste, delete, etc).
    /// Returns a [KeypressResult] indicating how the action was handled.
    pub(super) fn handle_file_action(&mut self, action: FileAction) -> KeypressResult {
        match action {
            FileAction::View => return self.handle_launch(Role::Viewer),
            FileAction::Edit => return self.handle_launch(Role::Editor),
            FileAction::Copy => self.mark_selected(TransferMode::Copy),
            FileAction::Cut => self.mark_selected(TransferMode::Cut),
            FileAction::Paste => self.handle_paste(),
            FileAction::Rename => self.prompt_rename(),
            FileAction::CreateDirectory => self.prompt_create_directory(),
            FileAction::Delete => self.prompt_delete(),
        }
        KeypressResult::Consumed
    }

    /// Handles sorting, hidden entries and search.
    pub(super) fn handle_view_action(&mut self, action: ViewAction) -> KeypressResult {
        match action {
            ViewAction::CycleSort => {
                self.sort.cycle_key();
                self.refresh_listing(None);
                self.push_message(format!("Sorted by: {}", self.sort.key.label()));
            }
            ViewAction::ToggleReverse => {
                self.sort.toggle_reverse();
                self.refresh_listing(None);
                self.push_message(format!("Sort reversed: {}", on_off(self.sort.reverse)));
            }
            ViewAction::ToggleHidden => {
                self.filter.toggle_hidden();
                self.refresh_listing(None);
                self.push_message(format!("Hidden files: {}", on_off(self.filter.show_hidden)));
            }
            ViewAction::Search => {
                self.filter.enter_search();
                self.refresh_listing(None);
            }
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
            SystemAction::Help => {
                self.toggle_help();
                KeypressResult::Consumed
            }
        }
    }

    /// Enters an input mode with the given parameters.
    pub fn enter_input_mode(&mut self, mode: InputMode, prompt: String, initial: Option<String>) {
        let buffer = initial.unwrap_or_default();
        self.actions
            .enter_mode(ActionMode::Input { mode, prompt }, buffer);
    }

    // Handlers

    /// Applies a selection movement. Returns Continue when nothing moved.
    fn move_nav<F>(&mut self, f: F) -> KeypressResult
    where
        F: FnOnce(&mut NavState) -> bool,
    {
        if f(&mut self.nav) {
            KeypressResult::Consumed
        } else {
            KeypressResult::Continue
        }
    }

    /// Handles the go to parent directory action.
    ///
    /// A no-op at the filesystem root. The confirmed filter does not survive the move.
    fn handle_go_parent(&mut self) -> KeypressResult {
        let Some(parent) = self.nav.current_dir().parent() else {
            return KeypressResult::Continue;
        };
        let parent_path = parent.to_path_buf();

        if std::fs::metadata(&parent_path).is_err() {
            self.push_message("Parent directory is unreachable");
            return KeypressResult::Consumed;
        }

        self.change_dir(parent_path);
        KeypressResult::Consumed
    }

    /// Handles the go into directory action.
    ///
    /// Only directories (and symlinks to them) are entered. The target is probed first; when
    /// it can not be read the path and selection stay as they are.
    fn handle_go_into_dir(&mut self) -> KeypressResult {
        let Some(entry) = self.nav.selected_entry() else {
            return KeypressResult::Continue;
        };
        if !entry.is_dir() {
            return KeypressResult::Continue;
        }
        let entry_path = self.nav.current_dir().join(entry.name());

        match std::fs::read_dir(&entry_path) {
            Ok(_) => self.change_dir(entry_path),
            Err(e) => {
                tracing::debug!(path = %entry_path.display(), error = %e, "cannot enter directory");
                self.push_message(FmError::from_io(e, &entry_path).to_string());
            }
        }
        KeypressResult::Consumed
    }

    fn handle_clear_filter(&mut self) -> KeypressResult {
        if !self.filter.is_filtering() {
            return KeypressResult::Continue;
        }
        self.filter.clear_query();
        self.refresh_listing(None);
        KeypressResult::Consumed
    }

    fn change_dir(&mut self, path: std::path::PathBuf) {
        self.nav.set_path(path);
        self.filter.clear_query();
        self.refresh_listing(None);
    }

    /// Resolves the viewer or editor for the selected file.
    ///
    /// Directories and other non-files are ignored. A missing program becomes a message.
    fn handle_launch(&mut self, role: Role) -> KeypressResult {
        let Some(entry) = self.nav.selected_entry() else {
            return KeypressResult::Continue;
        };
        if !entry.is_file() {
            return KeypressResult::Continue;
        }
        let path = self.nav.current_dir().join(entry.name());

        let programs = self.config.programs();
        let candidates = match role {
            Role::Viewer => programs.viewers(),
            Role::Editor => programs.editors(),
        };

        match prepare_launch(candidates, role.label(), &path) {
            Ok(launch) => KeypressResult::Launch(launch),
            Err(e) => {
                tracing::warn!(role = role.label(), error = %e, "no external program");
                self.push_message(e.to_string());
                KeypressResult::Consumed
            }
        }
    }

    /// Puts the selected entry on the clipboard, replacing what was there.
    fn mark_selected(&mut self, mode: TransferMode) {
        let Some(source) = self.nav.selected_path() else {
            return;
        };
        let name = display_name(&source);
        self.clipboard.mark(source, mode);

        let verb = match mode {
            TransferMode::Copy => "copied",
            TransferMode::Cut => "cut",
        };
        self.push_message(format!("'{name}' {verb} to clipboard"));
    }

    /// Pastes the clipboard into the current directory. The listing is refreshed either way.
    fn handle_paste(&mut self) {
        let dest_dir = self.nav.current_dir().to_path_buf();
        let focus = match self.clipboard.paste(&dest_dir) {
            Ok(PasteOutcome::NothingToPaste) => {
                self.push_message("Nothing to paste");
                None
            }
            Ok(PasteOutcome::Copied(dest)) => {
                self.push_message(format!("'{}' copied successfully!", display_name(&dest)));
                dest.file_name().map(OsString::from)
            }
            Ok(PasteOutcome::Moved(dest)) => {
                self.push_message(format!("'{}' moved successfully!", display_name(&dest)));
                dest.file_name().map(OsString::from)
            }
            Err(e) => {
                tracing::warn!(dest = %dest_dir.display(), error = %e, "paste failed");
                self.push_message(format!("Error pasting: {e}"));
                None
            }
        };

        self.refresh_listing(focus.as_deref());
    }

    fn toggle_help(&mut self) {
        if self.is_help_open() {
            self.overlays.retain(|o| !matches!(o, Overlay::Help));
        } else {
            self.overlays.push(Overlay::Help);
        }
    }

    // Input processes

    /// Exits the current input mode.
    /// Simple wrapper around actions::exit_mode.
    fn exit_input_mode(&mut self) {
        self.actions.exit_mode();
    }

    /// Renames the selected entry to the name in the input buffer.
    fn rename_entry(&mut self) {
        let new_name = self.actions.input_buffer().trim().to_string();
        if new_name.is_empty() {
            return;
        }
        match self.actions.action_rename(&self.nav) {
            Ok(Some(new_path)) => {
                self.push_message(format!("Renamed to '{new_name}' successfully!"));
                self.refresh_listing(new_path.file_name());
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(name = %new_name, error = %e, "rename failed");
                self.push_message(format!("Error renaming: {e}"));
                self.refresh_listing(None);
            }
        }
    }

    /// Creates a directory named after the input buffer.
    fn create_directory(&mut self) {
        let name = self.actions.input_buffer().trim().to_string();
        if name.is_empty() {
            return;
        }
        match self.actions.action_create_dir(&self.nav) {
            Ok(path) => {
                self.push_message(format!("Directory '{name}' created successfully!"));
                self.refresh_listing(path.file_name());
            }
            Err(FmError::AlreadyExists(_)) => {
                self.push_message(format!("Directory '{name}' already exists!"));
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "create directory failed");
                self.push_message(format!("Error: {e}"));
            }
        }
    }

    /// Deletes the selected entry when the answer in the buffer is a yes.
    fn confirm_delete(&mut self) {
        if !self.actions.is_confirmed() {
            return;
        }
        match self.actions.action_delete(&self.nav) {
            Ok(Some(path)) => {
                self.push_message(format!("'{}' deleted successfully!", display_name(&path)));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                self.push_message(format!("Error deleting: {e}"));
            }
        }
        self.refresh_listing(None);
    }

    // Prompt functions

    /// Prompts the user to confirm deletion of the selected entry.
    fn prompt_delete(&mut self) {
        if let Some(entry) = self.nav.selected_entry() {
            let prompt = format!("Delete '{}'? (y/N): ", entry.name_str());
            self.enter_input_mode(InputMode::ConfirmDelete, prompt, None);
        }
    }

    /// Prompts the user to rename the selected entry, pre-filled with its name.
    fn prompt_rename(&mut self) {
        if let Some(entry) = self.nav.selected_entry() {
            let name = entry.name_str().into_owned();
            self.enter_input_mode(InputMode::Rename, "Rename to: ".to_string(), Some(name));
        }
    }

    /// Prompts the user for the name of a new directory.
    fn prompt_create_directory(&mut self) {
        self.enter_input_mode(
            InputMode::NewDirectory,
            "New directory name: ".to_string(),
            None,
        );
    }
}

/// External program roles, named the way messages refer to them.
#[derive(Clone, Copy)]
enum Role {
    Viewer,
    Editor,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
        }
    }
}

/// True for keys that should be typed as text (no Ctrl/Alt held).
fn is_plain(key: &KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
