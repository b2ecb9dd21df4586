//! Navigation state and selection logic for atax.
//!
//! Holds the current directory, its arranged entries, the selection and the scroll window.
//! Every mutation keeps two invariants:
//! - `selected < entries.len()` whenever there are entries, `0` otherwise;
//! - `top <= selected < top + pane_height` and `top <= max(0, len - pane_height)`.

use crate::core::FileEntry;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Holds the navigation, selection and scroll state of the pane.
pub struct NavState {
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    top: usize,
    pane_height: usize,
}

impl NavState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            current_dir: path,
            entries: Vec::new(),
            selected: 0,
            top: 0,
            pane_height: 1,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn top(&self) -> usize {
        self.top
    }

    #[inline]
    pub fn pane_height(&self) -> usize {
        self.pane_height
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    /// Full path of the selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|e| self.current_dir.join(e.name()))
    }

    /// The entries inside the scroll window, paired with their absolute index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.top)
            .take(self.pane_height)
    }

    // Navigation functions

    /// Moves the selection up by one entry. Stops at the first entry.
    /// Returns `true` if the selection moved.
    pub fn move_up(&mut self) -> bool {
        self.move_to(self.selected.saturating_sub(1))
    }

    /// Moves the selection down by one entry. Stops at the last entry.
    pub fn move_down(&mut self) -> bool {
        self.move_to(self.selected.saturating_add(1))
    }

    pub fn page_up(&mut self) -> bool {
        self.move_to(self.selected.saturating_sub(self.pane_height))
    }

    pub fn page_down(&mut self) -> bool {
        self.move_to(self.selected.saturating_add(self.pane_height))
    }

    pub fn first(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.move_to(self.entries.len().saturating_sub(1))
    }

    /// Selects `idx` clamped to the listing and scrolls it into view.
    fn move_to(&mut self, idx: usize) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let old = self.selected;
        self.selected = idx.min(self.entries.len() - 1);
        self.ensure_visible();
        self.selected != old
    }

    /// Replaces the current directory. Selection and window restart at the top.
    /// Entries are left as they are until the next [NavState::set_entries].
    pub fn set_path(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.selected = 0;
        self.top = 0;
    }

    /// Installs a fresh listing and re-clamps selection and window.
    pub fn set_entries(&mut self, entries: Vec<FileEntry>) {
        self.entries = entries;
        self.reclamp();
    }

    /// Updates the pane height (minimum 1) and re-clamps.
    pub fn set_pane_height(&mut self, height: usize) {
        let height = height.max(1);
        if height != self.pane_height {
            self.pane_height = height;
            self.reclamp();
        }
    }

    /// Selects the entry called `name` if it is in the listing.
    /// Returns `false` and leaves the selection alone otherwise.
    pub fn focus(&mut self, name: &OsStr) -> bool {
        match self.entries.iter().position(|e| e.name() == name) {
            Some(idx) => {
                self.selected = idx;
                self.ensure_visible();
                true
            }
            None => false,
        }
    }

    fn reclamp(&mut self) {
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        self.ensure_visible();
    }

    /// Moves the window the minimum amount needed to show the selection, then pulls it back
    /// so it never hangs past the end of the listing.
    fn ensure_visible(&mut self) {
        if self.selected < self.top {
            self.top = self.selected;
        } else if self.selected >= self.top + self.pane_height {
            self.top = self.selected + 1 - self.pane_height;
        }
        let max_top = self.entries.len().saturating_sub(self.pane_height);
        self.top = self.top.min(max_top);
    }
}
