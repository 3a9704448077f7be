//! The filesystem collaborators: [`FileWalker`] lists content files and
//! [`FileStat`] says when each one was written. Both are injected into
//! [`crate::blog::Blog`] and [`crate::yeararchives::YearArchives`] so tests
//! (and hosts with their own notion of an entry's date) can swap them out.

use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the content files beneath a root directory, recursively, in no
/// particular order.
pub trait FileWalker: Send + Sync {
    fn walk(&self, root: &Path) -> Vec<PathBuf>;
}

/// Resolves a content file to the calendar time it should be filed under.
pub trait FileStat: Send + Sync {
    fn stat(&self, path: &Path) -> io::Result<NaiveDateTime>;
}

/// Walks the filesystem with [`walkdir`], keeping files whose extension is
/// one of `extensions`. Symlinks to files are kept; symlinked directories
/// are not descended into.
pub struct WalkDirWalker {
    extensions: HashSet<String>,
}

impl WalkDirWalker {
    pub fn new<I, S>(extensions: I) -> WalkDirWalker
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WalkDirWalker {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    fn is_entry(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.extensions.contains(ext),
            None => false,
        }
    }
}

impl FileWalker for WalkDirWalker {
    /// Unreadable directories are logged and skipped, and a missing root
    /// yields no files rather than an error.
    fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for result in WalkDir::new(root).follow_links(false) {
            match result {
                Ok(entry) => {
                    if is_file(&entry) && self.is_entry(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    log::warn!("Skipping unreadable path under '{}': {}", root.display(), err)
                }
            }
        }
        files
    }
}

// `follow_links(false)` reports symlinks as such, so resolve those here.
fn is_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Reads the file's modification time and converts it to local time.
pub struct MtimeStat;

impl FileStat for MtimeStat {
    fn stat(&self, path: &Path) -> io::Result<NaiveDateTime> {
        let modified = std::fs::metadata(path)?.modified()?;
        Ok(DateTime::<Local>::from(modified).naive_local())
    }
}
