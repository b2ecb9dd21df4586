//! Error types for the atax core.
//!
//! Every filesystem-facing operation returns [FmResult], so callers match on the
//! failure kind instead of inspecting raw [std::io::Error] values.
//! Stat failures on single listing entries are not errors: they turn into placeholder
//! metadata inside [crate::core::FileEntry].

use std::io;
use std::path::{Path, PathBuf};

/// Failure kinds surfaced to the user as transient status messages.
#[derive(Debug, thiserror::Error)]
pub enum FmError {
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Empty names, `.`/`..` and names containing a separator.
    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    #[error("Cannot paste a directory into itself: {}", .0.display())]
    IntoOwnSubtree(PathBuf),

    /// No candidate of the configured viewer/editor list is installed.
    #[error("No {0} found")]
    ExternalProcessMissing(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type FmResult<T> = Result<T, FmError>;

impl FmError {
    /// Maps an [io::Error] raised while touching `path` onto the error taxonomy.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FmError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => FmError::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FmError::AlreadyExists(path.to_path_buf()),
            io::ErrorKind::NotADirectory => FmError::NotADirectory(path.to_path_buf()),
            _ => FmError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
