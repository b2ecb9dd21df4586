//! Application state and input handling for atax.
//!
//! Submodules:
//! - [state]: the [AppState] session struct and the central key router.
//! - [handlers]: the [AppState] methods behind every action and prompt.
//! - [nav]: directory, listing, selection and scroll window.
//! - [actions]: prompt state and the file operations submitted through prompts.
//! - [clipboard]: the single copy/cut slot and paste.
//! - [keymap]: key to [keymap::Action] mapping built from the config.

pub mod actions;
pub mod clipboard;
pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod state;

pub use clipboard::{Clipboard, ClipboardSlot, PasteOutcome, TransferMode};
pub use nav::NavState;
pub use state::{AppState, KeypressResult};
