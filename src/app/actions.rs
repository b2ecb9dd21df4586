//! Action context and input mode logic for atax.
//!
//! Contains the [ActionContext] struct, tracking the line-input prompt state.
//! Defines the prompts used by file operations (rename, new directory, delete confirmation)
//! and performs those operations once a prompt is submitted.

use crate::app::nav::NavState;
use crate::core::{FmResult, fileops};

use std::path::PathBuf;

/// Describes the current mode for action handling/input.
///
/// Variants:
/// * `Normal` - Default browsing mode.
/// * `Input` - A line-input prompt with specific [InputMode] and prompt string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionMode {
    Normal,
    Input { mode: InputMode, prompt: String },
}

/// Enumerates all the available prompts.
///
/// * `Rename` - Rename the selected entry, pre-filled with its name.
/// * `NewDirectory` - Create a directory in the current directory.
/// * `ConfirmDelete` - y/N confirmation before deleting the selected entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Rename,
    NewDirectory,
    ConfirmDelete,
}

/// Tracks the current prompt, its input buffer and the cursor position.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug)]
pub struct ActionContext {
    mode: ActionMode,
    input_buffer: String,
    input_cursor_pos: usize,
}

impl ActionContext {
    // Getters / accessors

    pub fn mode(&self) -> &ActionMode {
        &self.mode
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn input_cursor_pos(&self) -> usize {
        self.input_cursor_pos
    }

    pub fn input_mode(&self) -> Option<InputMode> {
        match self.mode {
            ActionMode::Input { mode, .. } => Some(mode),
            ActionMode::Normal => None,
        }
    }

    // Mode functions

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, ActionMode::Input { .. })
    }

    pub fn enter_mode(&mut self, mode: ActionMode, initial_value: String) {
        self.mode = mode;
        self.input_buffer = initial_value;
        self.input_cursor_pos = self.input_buffer.len();
    }

    pub fn exit_mode(&mut self) {
        self.mode = ActionMode::Normal;
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    /// True when the delete prompt holds `y` or `yes` (any case). Empty means no.
    pub fn is_confirmed(&self) -> bool {
        let answer = self.input_buffer.trim();
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }

    // Actions functions

    /// Deletes the selected entry.
    ///
    /// Returns the removed path, or `None` when there was nothing selected.
    pub fn action_delete(&mut self, nav: &NavState) -> FmResult<Option<PathBuf>> {
        let Some(target) = nav.selected_path() else {
            return Ok(None);
        };
        fileops::remove(&target)?;
        Ok(Some(target))
    }

    /// Renames the selected entry to the name in the input buffer.
    pub fn action_rename(&mut self, nav: &NavState) -> FmResult<Option<PathBuf>> {
        let Some(old_path) = nav.selected_path() else {
            return Ok(None);
        };
        let new_path = fileops::rename(&old_path, self.input_buffer.trim())?;
        Ok(Some(new_path))
    }

    /// Creates a directory named after the input buffer in the current directory.
    pub fn action_create_dir(&mut self, nav: &NavState) -> FmResult<PathBuf> {
        fileops::create_dir(nav.current_dir(), self.input_buffer.trim())
    }

    // Cursor actions

    /// Moves the input cursor one character to the left, if possible.
    pub fn action_move_cursor_left(&mut self) {
        if let Some((prev, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_cursor_pos = prev;
        }
    }

    /// Moves the input cursor one character to the right, if possible.
    pub fn action_move_cursor_right(&mut self) {
        if let Some(ch) = self.input_buffer[self.input_cursor_pos..].chars().next() {
            self.input_cursor_pos += ch.len_utf8();
        }
    }

    /// Inserts a character at the current cursor position in the input buffer.
    pub fn action_insert_at_cursor(&mut self, ch: char) {
        self.input_buffer.insert(self.input_cursor_pos, ch);
        self.input_cursor_pos += ch.len_utf8();
    }

    /// Deletes the character before the current cursor position in the input buffer.
    ///
    /// Moves the cursor back accordingly
    pub fn action_backspace_at_cursor(&mut self) {
        if self.input_cursor_pos > 0
            && let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
                .char_indices()
                .next_back()
        {
            self.input_buffer.remove(previous);
            self.input_cursor_pos = previous;
        }
    }

    /// Deletes the character at the current cursor position in the input buffer.
    pub fn action_delete_at_cursor(&mut self) {
        if self.input_cursor_pos < self.input_buffer.len() {
            self.input_buffer.remove(self.input_cursor_pos);
        }
    }

    pub fn action_cursor_home(&mut self) {
        self.input_cursor_pos = 0;
    }

    pub fn action_cursor_end(&mut self) {
        self.input_cursor_pos = self.input_buffer.len();
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            mode: ActionMode::Normal,
            input_buffer: String::new(),
            input_cursor_pos: 0,
        }
    }
}
