//! Filesystem mutations for atax: create, remove, rename, copy and move.
//!
//! Every operation returns [FmResult] with the failing path attached. None of them
//! overwrite an existing target, and none roll back a partially copied tree.

use crate::core::{FmError, FmResult};

use std::fs::{self, FileTimes, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Maximum recursion depth for a tree copy.
const MAX_COPY_DEPTH: usize = 64;

/// Checks that `name` can be used as a single path component.
pub fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}

fn validate_name(name: &str) -> FmResult<()> {
    if is_valid_filename(name) {
        Ok(())
    } else {
        Err(FmError::InvalidName(name.to_string()))
    }
}

/// Fails with [FmError::AlreadyExists] if anything (even a dangling link) sits at `path`.
fn ensure_vacant(path: &Path) -> FmResult<()> {
    if fs::symlink_metadata(path).is_ok() {
        return Err(FmError::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

fn lstat(path: &Path) -> FmResult<Metadata> {
    fs::symlink_metadata(path).map_err(|e| FmError::from_io(e, path))
}

/// Creates the directory `name` inside `parent`. Existing names are rejected.
pub fn create_dir(parent: &Path, name: &str) -> FmResult<PathBuf> {
    validate_name(name)?;
    let target = parent.join(name);
    fs::create_dir(&target).map_err(|e| FmError::from_io(e, &target))?;
    tracing::info!(path = %target.display(), "created directory");
    Ok(target)
}

/// Deletes a file, symlink or whole directory tree. Symlinks are never followed.
pub fn remove(path: &Path) -> FmResult<()> {
    let meta = lstat(path)?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FmError::from_io(e, path))?;
    tracing::info!(path = %path.display(), "removed");
    Ok(())
}

/// Renames `path` to `new_name` within the same parent directory.
///
/// Renaming to the current name is a no-op. An existing target is never replaced.
pub fn rename(path: &Path, new_name: &str) -> FmResult<PathBuf> {
    validate_name(new_name)?;
    lstat(path)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("/"));
    let target = parent.join(new_name);
    if target == path {
        return Ok(target);
    }
    ensure_vacant(&target)?;
    fs::rename(path, &target).map_err(|e| FmError::from_io(e, path))?;
    tracing::info!(from = %path.display(), to = %target.display(), "renamed");
    Ok(target)
}

/// Rejects copying or moving a directory into itself or one of its descendants.
fn ensure_not_into_self(src: &Path, dest: &Path) -> FmResult<()> {
    let Some(dest_parent) = dest.parent() else {
        return Ok(());
    };
    let src_real = fs::canonicalize(src).map_err(|e| FmError::from_io(e, src))?;
    let dest_real = fs::canonicalize(dest_parent).map_err(|e| FmError::from_io(e, dest_parent))?;
    if src_real.is_dir() && dest_real.starts_with(&src_real) {
        return Err(FmError::IntoOwnSubtree(src.to_path_buf()));
    }
    Ok(())
}

/// Copies `src` to `dest` recursively.
///
/// Symlinks are copied as links. Permissions and modification times are carried over.
pub fn copy(src: &Path, dest: &Path) -> FmResult<()> {
    let meta = lstat(src)?;
    ensure_vacant(dest)?;
    if meta.is_dir() {
        ensure_not_into_self(src, dest)?;
    }
    copy_entry(src, dest, &meta, 0)?;
    tracing::info!(from = %src.display(), to = %dest.display(), "copied");
    Ok(())
}

fn copy_entry(src: &Path, dest: &Path, meta: &Metadata, depth: usize) -> FmResult<()> {
    let ft = meta.file_type();
    if ft.is_symlink() {
        copy_symlink(src, dest)
    } else if ft.is_dir() {
        copy_dir_recursive(src, dest, meta, depth)
    } else {
        fs::copy(src, dest).map_err(|e| FmError::from_io(e, src))?;
        preserve_mtime(meta, dest);
        Ok(())
    }
}

fn copy_symlink(src: &Path, dest: &Path) -> FmResult<()> {
    let link_target = fs::read_link(src).map_err(|e| FmError::from_io(e, src))?;
    #[cfg(unix)]
    std::os::unix::fs::symlink(&link_target, dest).map_err(|e| FmError::from_io(e, dest))?;
    #[cfg(not(unix))]
    {
        let _ = link_target;
        fs::copy(src, dest).map_err(|e| FmError::from_io(e, src))?;
    }
    Ok(())
}

fn copy_dir_recursive(src: &Path, dest: &Path, meta: &Metadata, depth: usize) -> FmResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(FmError::Io {
            path: src.to_path_buf(),
            source: io::Error::other(format!(
                "maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"
            )),
        });
    }

    fs::create_dir(dest).map_err(|e| FmError::from_io(e, dest))?;

    let read_dir = fs::read_dir(src).map_err(|e| FmError::from_io(e, src))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| FmError::from_io(e, src))?;
        let entry_path = entry.path();
        let child_meta = lstat(&entry_path)?;
        copy_entry(&entry_path, &dest.join(entry.file_name()), &child_meta, depth + 1)?;
    }

    // Permissions last, a read-only source dir would otherwise block its own contents.
    fs::set_permissions(dest, meta.permissions()).map_err(|e| FmError::from_io(e, dest))?;
    preserve_mtime(meta, dest);
    Ok(())
}

/// Carries the source mtime over to `dest`. Failures only get logged.
fn preserve_mtime(meta: &Metadata, dest: &Path) {
    let Ok(mtime) = meta.modified() else {
        return;
    };
    let result = fs::File::open(dest).and_then(|f| f.set_times(FileTimes::new().set_modified(mtime)));
    if let Err(e) = result {
        tracing::debug!(path = %dest.display(), error = %e, "could not preserve mtime");
    }
}

/// Moves `src` to `dest`.
///
/// Tries a plain rename first and falls back to copy + delete when the two paths live on
/// different filesystems.
pub fn move_path(src: &Path, dest: &Path) -> FmResult<()> {
    let meta = lstat(src)?;
    ensure_vacant(dest)?;
    if meta.is_dir() {
        ensure_not_into_self(src, dest)?;
    }

    match fs::rename(src, dest) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(from = %src.display(), "rename crosses devices, copying");
            copy_entry(src, dest, &meta, 0)?;
            remove(src)?;
        }
        Err(e) => return Err(FmError::from_io(e, src)),
    }
    tracing::info!(from = %src.display(), to = %dest.display(), "moved");
    Ok(())
}
