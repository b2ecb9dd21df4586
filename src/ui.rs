//! Terminal UI for atax, drawn with ratatui.
//!
//! - [render]: the per-frame entry point and the screen layout.
//! - [panes]: the entry listing.
//! - [widgets]: title bar, path line, header, status line, command bar and help popup.
//! - [overlays]: messages and popups stacked over the listing.

pub mod overlays;
pub mod panes;
pub mod render;
pub mod widgets;

pub use render::{CHROME_ROWS, render};
