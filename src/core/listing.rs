//! The listing pipeline for atax.
//!
//! Turns a raw directory snapshot into the ordered, filtered sequence the browser displays:
//! hidden filtering, directories-first partitioning, per-partition sorting and the final
//! case-insensitive substring filter.
//!
//! [SortConfig] and [FilterConfig] are session-global and re-applied on every refresh.

use crate::core::{FileEntry, browse_dir};

use std::cmp::Ordering;
use std::path::Path;

/// Sort key of the listing, cycled with the sort key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Modified,
    Type,
}

impl SortKey {
    /// Next key in the fixed cycle name → size → modified → type → name.
    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Size,
            SortKey::Size => SortKey::Modified,
            SortKey::Modified => SortKey::Type,
            SortKey::Type => SortKey::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Modified => "modified",
            SortKey::Type => "type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: SortKey,
    pub reverse: bool,
}

impl SortConfig {
    pub fn cycle_key(&mut self) {
        self.key = self.key.next();
    }

    pub fn toggle_reverse(&mut self) {
        self.reverse = !self.reverse;
    }

    /// Ordering of two entries of the same partition.
    /// Ties fall back to the lowercase name, which is never reversed.
    fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        let primary = match self.key {
            SortKey::Name => a.lowercase_name().cmp(b.lowercase_name()),
            SortKey::Size => a.size().cmp(&b.size()),
            SortKey::Modified => a.modified().cmp(&b.modified()),
            SortKey::Type => a.extension().cmp(&b.extension()),
        };
        let primary = if self.reverse {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| a.lowercase_name().cmp(b.lowercase_name()))
    }
}

/// Visibility and search state of the listing.
///
/// `search_query` narrows the listing whenever it is non-empty. It is either being typed
/// (`search_mode == true`) or was confirmed with Enter and is kept as a filter until cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub show_hidden: bool,
    pub search_mode: bool,
    pub search_query: String,
}

impl FilterConfig {
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
    }

    /// Starts a new search. Any confirmed filter is replaced.
    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search_query.clear();
    }

    pub fn push_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.search_query.pop();
    }

    /// Leaves search mode and discards the query.
    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.search_query.clear();
    }

    /// Leaves search mode keeping the query as a confirmed filter.
    pub fn confirm_search(&mut self) {
        self.search_mode = false;
    }

    pub fn clear_query(&mut self) {
        self.search_query.clear();
    }

    #[inline]
    pub fn is_filtering(&self) -> bool {
        !self.search_query.is_empty()
    }

    fn matches(&self, entry: &FileEntry, needle: &str) -> bool {
        entry.lowercase_name().contains(needle)
    }
}

/// Reads `path` and arranges its children for display.
///
/// Never fails: an unreadable directory yields an empty listing.
pub fn refresh(path: &Path, sort: &SortConfig, filter: &FilterConfig) -> Vec<FileEntry> {
    match browse_dir(path) {
        Ok(entries) => arrange(entries, sort, filter),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "listing failed");
            Vec::new()
        }
    }
}

/// Applies hidden filtering, partitioning, sorting and the search filter to a snapshot.
pub fn arrange(entries: Vec<FileEntry>, sort: &SortConfig, filter: &FilterConfig) -> Vec<FileEntry> {
    let (mut dirs, mut files): (Vec<FileEntry>, Vec<FileEntry>) = entries
        .into_iter()
        .filter(|e| filter.show_hidden || !e.is_hidden())
        .partition(|e| e.is_dir());

    dirs.sort_by(|a, b| sort.compare(a, b));
    files.sort_by(|a, b| sort.compare(a, b));

    dirs.append(&mut files);

    if filter.is_filtering() {
        let needle = filter.search_query.to_lowercase();
        dirs.retain(|e| filter.matches(e, &needle));
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntryKind, EntryMeta};
    use std::ffi::OsString;
    use std::time::{Duration, SystemTime};

    fn file(name: &str, size: u64, age_secs: Option<u64>) -> FileEntry {
        let flags = if name.starts_with('.') {
            FileEntry::IS_HIDDEN
        } else {
            0
        };
        let meta = EntryMeta {
            size,
            modified: age_secs.map(|s| SystemTime::UNIX_EPOCH + Duration::from_secs(s)),
            mode: 0o100644,
            uid: 0,
            gid: 0,
            inode: 1,
        };
        FileEntry::new(OsString::from(name), EntryKind::RegularFile, flags, Some(meta))
    }

    fn dir(name: &str) -> FileEntry {
        let mut flags = FileEntry::IS_DIR;
        if name.starts_with('.') {
            flags |= FileEntry::IS_HIDDEN;
        }
        FileEntry::new(OsString::from(name), EntryKind::Directory, flags, None)
    }

    fn names(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name_str().into_owned()).collect()
    }

    #[test]
    fn sort_key_cycle_has_period_four() {
        let start = SortKey::Modified;
        let mut key = start;
        for _ in 0..4 {
            key = key.next();
        }
        assert_eq!(key, start);
        assert_eq!(SortKey::Name.next(), SortKey::Size);
        assert_eq!(SortKey::Type.next(), SortKey::Name);
    }

    #[test]
    fn directories_come_first_and_names_ignore_case() {
        let entries = vec![
            file("b.txt", 1, None),
            dir("Zeta"),
            file("A.txt", 1, None),
            dir("alpha"),
        ];
        let out = arrange(entries, &SortConfig::default(), &FilterConfig::default());
        assert_eq!(names(&out), vec!["alpha", "Zeta", "A.txt", "b.txt"]);
    }

    #[test]
    fn reverse_inverts_each_partition() {
        let entries = vec![dir("a"), dir("b"), file("x", 1, None), file("y", 1, None)];
        let sort = SortConfig {
            key: SortKey::Name,
            reverse: true,
        };
        let out = arrange(entries, &sort, &FilterConfig::default());
        assert_eq!(names(&out), vec!["b", "a", "y", "x"]);
    }

    #[test]
    fn size_and_modified_sort_ascending() {
        let entries = vec![
            file("big", 300, Some(10)),
            file("small", 1, Some(30)),
            file("mid", 20, None),
        ];
        let by_size = SortConfig {
            key: SortKey::Size,
            reverse: false,
        };
        let out = arrange(entries.clone(), &by_size, &FilterConfig::default());
        assert_eq!(names(&out), vec!["small", "mid", "big"]);

        let by_time = SortConfig {
            key: SortKey::Modified,
            reverse: false,
        };
        let out = arrange(entries, &by_time, &FilterConfig::default());
        assert_eq!(names(&out), vec!["mid", "big", "small"], "unknown mtime first");
    }

    #[test]
    fn type_sort_uses_lowercase_extension() {
        let entries = vec![
            file("z.TXT", 1, None),
            file("a.rs", 1, None),
            file("Makefile", 1, None),
            file("b.md", 1, None),
        ];
        let sort = SortConfig {
            key: SortKey::Type,
            reverse: false,
        };
        let out = arrange(entries, &sort, &FilterConfig::default());
        assert_eq!(names(&out), vec!["Makefile", "b.md", "a.rs", "z.TXT"]);
    }

    #[test]
    fn ties_fall_back_to_name() {
        let entries = vec![file("c", 5, None), file("a", 5, None), file("b", 5, None)];
        let sort = SortConfig {
            key: SortKey::Size,
            reverse: true,
        };
        let out = arrange(entries, &sort, &FilterConfig::default());
        assert_eq!(names(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn substring_filter_is_case_insensitive() {
        let entries = vec![file("a.txt", 1, None), file("b.txt", 1, None), file("ABC", 1, None)];
        let filter = FilterConfig {
            search_mode: true,
            search_query: "a".into(),
            ..FilterConfig::default()
        };
        let out = arrange(entries.clone(), &SortConfig::default(), &filter);
        assert_eq!(names(&out), vec!["a.txt", "ABC"]);

        let empty = FilterConfig {
            search_mode: true,
            ..FilterConfig::default()
        };
        assert_eq!(arrange(entries, &SortConfig::default(), &empty).len(), 3);
    }

    #[test]
    fn hidden_entries_follow_toggle() {
        let entries = vec![dir(".git"), file("readme.md", 1, None)];
        let mut filter = FilterConfig::default();
        let out = arrange(entries.clone(), &SortConfig::default(), &filter);
        assert_eq!(names(&out), vec!["readme.md"]);

        filter.toggle_hidden();
        let out = arrange(entries, &SortConfig::default(), &filter);
        assert_eq!(names(&out), vec![".git", "readme.md"]);
    }

    #[test]
    fn search_lifecycle() {
        let mut filter = FilterConfig::default();
        filter.enter_search();
        for c in "rea".chars() {
            filter.push_char(c);
        }
        filter.pop_char();
        assert_eq!(filter.search_query, "re");
        filter.confirm_search();
        assert!(!filter.search_mode);
        assert!(filter.is_filtering());

        filter.enter_search();
        assert!(!filter.is_filtering(), "a new search replaces the confirmed filter");
        filter.push_char('x');
        filter.cancel_search();
        assert!(!filter.search_mode);
        assert!(filter.search_query.is_empty());
    }

    #[test]
    fn refresh_unreadable_dir_is_empty() {
        let out = refresh(
            Path::new("/path/does/not/exist"),
            &SortConfig::default(),
            &FilterConfig::default(),
        );
        assert!(out.is_empty());
    }
}
