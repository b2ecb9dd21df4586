//! Directory reading for atax.
//!
//! Provides the [FileEntry] struct which is used throughout atax, the [EntryKind] tag
//! and the [EntryMeta] stat snapshot used by the formatter and the listing pipeline.
//! Entries are read fresh on every listing refresh and never cached.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// The kind of a directory child, determined once per refresh from `lstat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    RegularFile,
    Symlink,
    Other,
}

/// Stat snapshot of an entry. Symlinks report the metadata of their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub inode: u64,
}

impl EntryMeta {
    pub(crate) fn from_metadata(md: &Metadata) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            EntryMeta {
                size: md.len(),
                modified: md.modified().ok(),
                mode: md.mode(),
                uid: md.uid(),
                gid: md.gid(),
                inode: md.ino(),
            }
        }
        #[cfg(not(unix))]
        {
            EntryMeta {
                size: md.len(),
                modified: md.modified().ok(),
                mode: if md.permissions().readonly() { 0o444 } else { 0o644 },
                uid: 0,
                gid: 0,
                inode: 0,
            }
        }
    }
}

/// Represents a single entry in a directory listing
/// Holds the name, kind, attribute flags and the stat snapshot.
/// Created and populated by the browse_dir function.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Box<OsStr>,
    lowercase_name: Box<str>,
    kind: EntryKind,
    flags: u8,
    meta: Option<EntryMeta>,
}

impl FileEntry {
    // Flag bit definitions
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_HIDDEN: u8 = 1 << 1;
    pub(crate) const IS_SYMLINK: u8 = 1 << 2;
    pub(crate) const IS_BROKEN_SYM: u8 = 1 << 3;
    pub(crate) const IS_EXECUTABLE: u8 = 1 << 4;

    /// Any execute bit. Used for coloring executable files in UI
    pub(crate) const EXEC_FLAG: u32 = 0o111;

    pub fn new(name: OsString, kind: EntryKind, flags: u8, meta: Option<EntryMeta>) -> Self {
        let lowercase_name = name.to_string_lossy().to_lowercase().into_boxed_str();
        FileEntry {
            name: name.into_boxed_os_str(),
            lowercase_name,
            kind,
            flags,
            meta,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn lowercase_name(&self) -> &str {
        &self.lowercase_name
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn meta(&self) -> Option<&EntryMeta> {
        self.meta.as_ref()
    }

    /// True for directories and for symlinks pointing at one.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_broken_sym(&self) -> bool {
        self.flags & Self::IS_BROKEN_SYM != 0
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.flags & Self::IS_EXECUTABLE != 0
    }

    /// Regular file, or a symlink resolving to one. Viewer and editor only accept these.
    pub fn is_file(&self) -> bool {
        match self.kind {
            EntryKind::RegularFile => true,
            EntryKind::Symlink => !self.is_dir() && !self.is_broken_sym(),
            _ => false,
        }
    }

    /// Byte size, 0 when stat failed.
    #[inline]
    pub fn size(&self) -> u64 {
        self.meta.map_or(0, |m| m.size)
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.meta.and_then(|m| m.modified)
    }

    /// Lowercased extension, empty for names without one (including dotfiles like `.bashrc`).
    pub fn extension(&self) -> String {
        Path::new(&*self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

/// Reads the contents of the provided directory and returns them in a vector of FileEntry
///
/// Entries whose metadata can not be read are kept with `meta = None`.
/// # Returns
/// A Result containing a vector of FileEntry structs or an std::io::Error
pub fn browse_dir(path: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(256);

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        entries.push(read_entry(entry.file_name(), &entry.path()));
    }
    Ok(entries)
}

/// Builds a single [FileEntry] from `lstat` (kind) and `stat` (metadata).
pub(crate) fn read_entry(name: OsString, path: &Path) -> FileEntry {
    let kind = match fs::symlink_metadata(path) {
        Ok(md) => {
            let ft = md.file_type();
            if ft.is_symlink() {
                EntryKind::Symlink
            } else if ft.is_dir() {
                EntryKind::Directory
            } else if ft.is_file() {
                EntryKind::RegularFile
            } else {
                EntryKind::Other
            }
        }
        Err(_) => EntryKind::Other,
    };

    let mut flags = 0u8;
    if kind == EntryKind::Directory {
        flags |= FileEntry::IS_DIR;
    }
    if kind == EntryKind::Symlink {
        flags |= FileEntry::IS_SYMLINK;
    }

    let meta = match fs::metadata(path) {
        Ok(md) => {
            if md.is_dir() {
                flags |= FileEntry::IS_DIR;
            } else if is_executable(&md) {
                flags |= FileEntry::IS_EXECUTABLE;
            }
            Some(EntryMeta::from_metadata(&md))
        }
        Err(_) => {
            if kind == EntryKind::Symlink {
                flags |= FileEntry::IS_BROKEN_SYM;
            }
            None
        }
    };

    if name.to_string_lossy().starts_with('.') {
        flags |= FileEntry::IS_HIDDEN;
    }

    FileEntry::new(name, kind, flags, meta)
}

#[cfg(unix)]
fn is_executable(md: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & FileEntry::EXEC_FLAG != 0
}

#[cfg(not(unix))]
fn is_executable(_md: &Metadata) -> bool {
    false
}
