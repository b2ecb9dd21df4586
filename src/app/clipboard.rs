//! Clipboard for copy/cut/paste transfers in atax.
//!
//! Holds at most one pending transfer. Marking overwrites the slot, a copy-paste leaves it
//! in place so it can be pasted again, and a cut-paste clears it once the move succeeded.
//! The source is re-checked against the filesystem at paste time.

use crate::core::{FmError, FmResult, fileops};

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Cut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSlot {
    pub source: PathBuf,
    pub mode: TransferMode,
}

/// What a paste did. Destinations are the paths that were created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    NothingToPaste,
    Copied(PathBuf),
    Moved(PathBuf),
}

#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Option<ClipboardSlot>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn slot(&self) -> Option<&ClipboardSlot> {
        self.slot.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn mark(&mut self, source: PathBuf, mode: TransferMode) {
        self.slot = Some(ClipboardSlot { source, mode });
    }

    /// Pastes the pending transfer into `dest_dir` under the source's own name.
    ///
    /// Existing destinations are never overwritten. A failed cut keeps the slot.
    pub fn paste(&mut self, dest_dir: &Path) -> FmResult<PasteOutcome> {
        let Some(slot) = self.slot.as_ref() else {
            return Ok(PasteOutcome::NothingToPaste);
        };

        if std::fs::symlink_metadata(&slot.source).is_err() {
            return Err(FmError::NotFound(slot.source.clone()));
        }
        let name = slot
            .source
            .file_name()
            .ok_or_else(|| FmError::InvalidName(slot.source.display().to_string()))?;
        let dest = dest_dir.join(name);

        match slot.mode {
            TransferMode::Copy => {
                fileops::copy(&slot.source, &dest)?;
                Ok(PasteOutcome::Copied(dest))
            }
            TransferMode::Cut => {
                fileops::move_path(&slot.source, &dest)?;
                self.slot = None;
                Ok(PasteOutcome::Moved(dest))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn empty_clipboard_has_nothing_to_paste() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let mut clip = Clipboard::new();
        assert_eq!(clip.paste(tmp.path())?, PasteOutcome::NothingToPaste);
        Ok(())
    }

    #[test]
    fn copy_paste_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("x.txt");
        fs::write(&src, "data")?;
        let d1 = tmp.path().join("d1");
        let d2 = tmp.path().join("d2");
        fs::create_dir(&d1)?;
        fs::create_dir(&d2)?;

        let mut clip = Clipboard::new();
        clip.mark(src.clone(), TransferMode::Copy);
        assert_eq!(clip.paste(&d1)?, PasteOutcome::Copied(d1.join("x.txt")));
        assert_eq!(clip.paste(&d2)?, PasteOutcome::Copied(d2.join("x.txt")));
        assert!(src.exists());
        assert!(!clip.is_empty());
        Ok(())
    }

    #[test]
    fn cut_paste_clears_slot() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("x.txt");
        File::create(&src)?;
        let dest_dir = tmp.path().join("d");
        fs::create_dir(&dest_dir)?;

        let mut clip = Clipboard::new();
        clip.mark(src.clone(), TransferMode::Cut);
        assert_eq!(
            clip.paste(&dest_dir)?,
            PasteOutcome::Moved(dest_dir.join("x.txt"))
        );
        assert!(!src.exists());
        assert!(clip.is_empty());
        assert_eq!(clip.paste(&dest_dir)?, PasteOutcome::NothingToPaste);
        Ok(())
    }

    #[test]
    fn failed_cut_keeps_slot() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("x.txt");
        File::create(&src)?;
        let dest_dir = tmp.path().join("d");
        fs::create_dir(&dest_dir)?;
        File::create(dest_dir.join("x.txt"))?;

        let mut clip = Clipboard::new();
        clip.mark(src.clone(), TransferMode::Cut);
        let res = clip.paste(&dest_dir);
        assert!(matches!(res, Err(FmError::AlreadyExists(_))));
        assert_eq!(
            clip.slot(),
            Some(&ClipboardSlot {
                source: src.clone(),
                mode: TransferMode::Cut
            })
        );
        assert!(src.exists());
        Ok(())
    }

    #[test]
    fn vanished_source_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let src = tmp.path().join("gone.txt");
        File::create(&src)?;

        let mut clip = Clipboard::new();
        clip.mark(src.clone(), TransferMode::Copy);
        fs::remove_file(&src)?;
        assert!(matches!(clip.paste(tmp.path()), Err(FmError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn mark_overwrites() {
        let mut clip = Clipboard::new();
        clip.mark(PathBuf::from("/a"), TransferMode::Copy);
        clip.mark(PathBuf::from("/b"), TransferMode::Cut);
        let slot = clip.slot().cloned();
        assert_eq!(
            slot,
            Some(ClipboardSlot {
                source: PathBuf::from("/b"),
                mode: TransferMode::Cut
            })
        );
        assert!(!clip.is_empty());
    }
}
