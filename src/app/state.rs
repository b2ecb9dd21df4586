//! Application State and main controller module for atax.
//!
//! This module defines the overall [AppState] struct, which holds the whole browsing session:
//! - Configuration and the keymap built from it
//! - Navigation state (directory, listing, selection, scroll window)
//! - Sort and filter configuration, including search mode
//! - Prompt state for rename, new directory and delete confirmation
//! - The clipboard
//! - Overlays (transient messages, help) and the message expiry
//!
//! Handlers never touch the terminal. A key either mutates this state or asks the terminal
//! loop to run an external program through [KeypressResult::Launch].

use crate::app::actions::ActionContext;
use crate::app::clipboard::Clipboard;
use crate::app::keymap::{Action, Keymap};
use crate::app::nav::NavState;
use crate::config::Config;
use crate::core::proc::Launch;
use crate::core::{FilterConfig, SortConfig, listing};
use crate::ui::overlays::{Overlay, OverlayStack};
use crate::utils::start_dir;

use crossterm::event::KeyEvent;

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::time::{Duration, Instant};

/// Enumeration for each individual keypress result processed.
///
/// Is used by the terminal loop to decide what happens after a key.
#[derive(Debug, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    /// Hand the terminal to an external viewer or editor.
    Launch(Launch),
}

/// Main struct which holds the central application state of atax
///
/// Every session starts in the home directory, sorted by name ascending with hidden
/// entries off and an empty clipboard. None of this is persisted.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) nav: NavState,
    pub(super) sort: SortConfig,
    pub(super) filter: FilterConfig,
    pub(super) actions: ActionContext,
    pub(super) clipboard: Clipboard,

    pub(super) notification_time: Option<Instant>,
    pub(super) overlays: OverlayStack,
}

impl<'a> AppState<'a> {
    /// Starts a session in the home directory.
    pub fn new(config: &'a Config) -> Self {
        Self::from_dir(config, &start_dir())
    }

    /// Starts a session in `initial_path`. Mostly useful for tests.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> Self {
        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            nav: NavState::new(initial_path.to_path_buf()),
            sort: SortConfig::default(),
            filter: FilterConfig::default(),
            actions: ActionContext::default(),
            clipboard: Clipboard::new(),
            notification_time: None,
            overlays: OverlayStack::new(),
        };

        app.refresh_listing(None);
        app
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    #[inline]
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    #[inline]
    pub fn actions(&self) -> &ActionContext {
        &self.actions
    }

    #[inline]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[inline]
    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    /// Text of the transient message currently shown, if any.
    pub fn message(&self) -> Option<&str> {
        self.overlays.iter().rev().find_map(|o| match o {
            Overlay::Message { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn is_help_open(&self) -> bool {
        self.overlays.iter().any(|o| matches!(o, Overlay::Help))
    }

    // Listing

    /// Re-runs the listing pipeline for the current directory and re-clamps the selection.
    ///
    /// With `focus` set, the entry of that name is selected when it is still listed.
    pub fn refresh_listing(&mut self, focus: Option<&OsStr>) {
        let entries = listing::refresh(self.nav.current_dir(), &self.sort, &self.filter);
        self.nav.set_entries(entries);
        if let Some(name) = focus {
            self.nav.focus(name);
        }
    }

    /// Updates the pane height from the current terminal size.
    pub fn set_pane_height(&mut self, height: usize) {
        self.nav.set_pane_height(height);
    }

    // Messages

    /// Expires the transient message once its lifetime is over.
    ///
    /// Returns true when something changed and the frame should be redrawn.
    pub fn tick(&mut self) -> bool {
        if let Some(expiry) = self.notification_time
            && Instant::now() >= expiry
        {
            self.notification_time = None;
            self.overlays
                .retain(|o| !matches!(o, Overlay::Message { .. }));
            return true;
        }
        false
    }

    /// Time left until the transient message expires. The terminal loop polls with it.
    pub fn message_remaining(&self) -> Option<Duration> {
        self.notification_time
            .map(|expiry| expiry.saturating_duration_since(Instant::now()))
    }

    /// Shows a transient message for the configured lifetime, replacing the previous one.
    pub fn push_message(&mut self, text: impl Into<String>) {
        let duration = self.config.general().message_duration();
        self.push_overlay_message(text.into(), duration);
    }

    /// Pushes a message overlay that lasts for the specified duration.
    pub fn push_overlay_message(&mut self, text: String, duration: Duration) {
        self.notification_time = Some(Instant::now() + duration);
        self.overlays
            .retain(|o| !matches!(o, Overlay::Message { .. }));
        self.overlays.push(Overlay::Message { text });
    }

    /// Reports the outcome of an external program run by the terminal loop and refreshes
    /// the listing, since the program may have changed the file.
    pub fn report_launch(&mut self, launch: &Launch, result: io::Result<ExitStatus>) {
        match result {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(program = %launch.program().display(), %status, "external program failed");
                self.push_message(format!(
                    "{} exited with {}",
                    launch.program().display(),
                    status
                ));
            }
            Err(e) => {
                tracing::warn!(program = %launch.program().display(), error = %e, "external program could not run");
                self.push_message(format!(
                    "Error running {}: {}",
                    launch.program().display(),
                    e
                ));
            }
        }

        let focus = launch.path().file_name().map(|n| n.to_os_string());
        self.refresh_listing(focus.as_deref());
    }

    /// Central key handler
    ///
    /// Search entry takes every key first, then an open prompt, then the help overlay
    /// (any key closes it). Everything else goes through the keymap; unbound keys are ignored.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if self.filter.search_mode {
            return self.handle_search_mode(key);
        }

        if self.actions.is_input_mode() {
            return self.handle_input_mode(key);
        }

        if self.is_help_open() {
            self.overlays.retain(|o| !matches!(o, Overlay::Help));
            return KeypressResult::Consumed;
        }

        if let Some(action) = self.keymap.lookup(key) {
            return match action {
                Action::Nav(nav_act) => self.handle_nav_action(nav_act),
                Action::File(file_act) => self.handle_file_action(file_act),
                Action::View(view_act) => self.handle_view_action(view_act),
                Action::System(sys_act) => self.handle_sys_action(sys_act),
            };
        }

        KeypressResult::Continue
    }
}
