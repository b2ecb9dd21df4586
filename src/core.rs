//! Core runtime logic for atax.
//!
//! This module contains the non-UI “engine” pieces used by the application:
//! - [fm]: directory reading and entry metadata (see [browse_dir], [FileEntry], [EntryKind]).
//! - [listing]: the listing pipeline, with [SortConfig] and [FilterConfig].
//! - [formatter]: display strings for permissions, owners, sizes and times.
//! - [fileops]: create, remove, rename, copy and move with typed errors.
//! - [error]: the [FmError] taxonomy shared by everything above.
//! - [proc]: resolving and running external viewers/editors.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod error;
pub mod fileops;
pub mod fm;
pub mod formatter;
pub mod listing;
pub mod proc;
pub mod terminal;

pub use error::{FmError, FmResult};
pub use fm::{EntryKind, EntryMeta, FileEntry, browse_dir};
pub use formatter::{
    EntryDetails, format_file_size, format_file_time, format_permissions, format_row,
    format_status, header_line, sanitize_to_exact_width,
};
pub use listing::{FilterConfig, SortConfig, SortKey};
pub use proc::Launch;
