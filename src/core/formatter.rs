//! Display formatting for file entries in atax.
//!
//! Turns the raw [crate::core::EntryMeta] snapshot into the strings shown in the listing rows and the
//! status line: size units, permission string, owner/group names and modification time.
//! Entries without metadata (stat failed) get fixed placeholders instead.

use crate::core::{EntryKind, FileEntry};

use chrono::{DateTime, Local};
use humansize::{BINARY, FormatSizeOptions, format_size};
use unicode_width::UnicodeWidthChar;

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};
use std::time::SystemTime;

pub const PLACEHOLDER_PERMISSIONS: &str = "??????????";
pub const PLACEHOLDER_NAME: &str = "?";
pub const PLACEHOLDER_TIME: &str = "????-??-?? ??:??";

static OWNER_CACHE: LazyLock<RwLock<HashMap<u32, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));
static GROUP_CACHE: LazyLock<RwLock<HashMap<u32, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Display strings for one entry, as used by the rows and the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub size: String,
    pub modified: String,
    pub inode: String,
}

impl EntryDetails {
    pub fn describe(entry: &FileEntry) -> Self {
        match entry.meta() {
            Some(meta) => EntryDetails {
                permissions: format_permissions(Some(meta.mode), entry.kind()),
                owner: owner_name(meta.uid),
                group: group_name(meta.gid),
                size: format_file_size(meta.size),
                modified: format_file_time(meta.modified),
                inode: meta.inode.to_string(),
            },
            None => Self::placeholder(),
        }
    }

    pub fn placeholder() -> Self {
        EntryDetails {
            permissions: PLACEHOLDER_PERMISSIONS.to_string(),
            owner: PLACEHOLDER_NAME.to_string(),
            group: PLACEHOLDER_NAME.to_string(),
            size: format_file_size(0),
            modified: PLACEHOLDER_TIME.to_string(),
            inode: PLACEHOLDER_NAME.to_string(),
        }
    }
}

/// Formats a byte count with binary units and one decimal, like `1.5 KiB`.
pub fn format_file_size(size: u64) -> String {
    let opts = FormatSizeOptions::from(BINARY).decimal_places(1);
    format_size(size, opts)
}

/// Formats the mode bits in a unix-like format
///
/// Returns a string like 'drwxr-xr-x'. The first column comes from the entry kind,
/// symlinks show `l` even though the mode belongs to their target.
pub fn format_permissions(mode: Option<u32>, kind: EntryKind) -> String {
    let Some(mode) = mode else {
        return PLACEHOLDER_PERMISSIONS.to_string();
    };
    let first = match kind {
        EntryKind::Directory => 'd',
        EntryKind::Symlink => 'l',
        EntryKind::RegularFile => '-',
        EntryKind::Other => '?',
    };
    let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1u32 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1u32 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1u32 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Resolves a uid to a user name, with caching. Unknown ids fall back to the number.
pub fn owner_name(uid: u32) -> String {
    if let Ok(cache) = OWNER_CACHE.read()
        && let Some(name) = cache.get(&uid)
    {
        return name.clone();
    }
    let name = lookup_user(uid).unwrap_or_else(|| uid.to_string());
    if let Ok(mut cache) = OWNER_CACHE.write() {
        cache.insert(uid, name.clone());
    }
    name
}

/// Resolves a gid to a group name, with caching.
pub fn group_name(gid: u32) -> String {
    if let Ok(cache) = GROUP_CACHE.read()
        && let Some(name) = cache.get(&gid)
    {
        return name.clone();
    }
    let name = lookup_group(gid).unwrap_or_else(|| gid.to_string());
    if let Ok(mut cache) = GROUP_CACHE.write() {
        cache.insert(gid, name.clone());
    }
    name
}

#[cfg(unix)]
fn lookup_user(uid: u32) -> Option<String> {
    uzers::get_user_by_uid(uid).map(|u| u.name().to_string_lossy().into_owned())
}

#[cfg(unix)]
fn lookup_group(gid: u32) -> Option<String> {
    uzers::get_group_by_gid(gid).map(|g| g.name().to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn lookup_user(_uid: u32) -> Option<String> {
    None
}

#[cfg(not(unix))]
fn lookup_group(_gid: u32) -> Option<String> {
    None
}

/// Formats the file modification time in local time, `YYYY-MM-DD HH:MM`.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_else(|| PLACEHOLDER_TIME.to_string())
}

/// Short kind label for the status line.
pub fn format_kind(entry: &FileEntry) -> &'static str {
    if entry.is_dir() {
        "Directory"
    } else if entry.is_symlink() {
        "Symlink"
    } else {
        "File"
    }
}

/// Clean the output to the width of the pane
/// by removing control characters, expanding tabs to 4 spaces,
/// and truncating or padding the string to fit exactly.
/// # Returns
/// A sanitized string that fits exactly within the specified width.
pub fn sanitize_to_exact_width(line: &str, pane_width: usize) -> String {
    let mut out = String::with_capacity(pane_width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > pane_width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > pane_width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < pane_width {
        out.push_str(&" ".repeat(pane_width - current_w));
    }

    out
}

/// Builds one listing row: permissions, owner, group, size, mtime and name in fixed columns.
pub fn format_row(entry: &FileEntry) -> String {
    let d = EntryDetails::describe(entry);
    let mut name = entry.name_str().into_owned();
    if entry.is_dir() {
        name.push('/');
    }
    format!(
        "{:<11} {:<8} {:<8} {:>10}  {:<16}  {}",
        d.permissions, d.owner, d.group, d.size, d.modified, name
    )
}

/// Builds the entry part of the status line for the selected entry.
pub fn format_status(entry: &FileEntry) -> String {
    let d = EntryDetails::describe(entry);
    format!(
        "{}: {} | Size: {} | Permissions: {} | Inode: {}",
        format_kind(entry),
        entry.name_str(),
        d.size,
        d.permissions,
        d.inode
    )
}

/// Column header matching [format_row].
pub fn header_line() -> String {
    format!(
        "{:<11} {:<8} {:<8} {:>10}  {:<16}  {}",
        "Permissions", "Owner", "Group", "Size", "Modified", "Name"
    )
}
