//! Builds the year index and the flat [`Item`] listing from which year
//! archive pages are grouped.

use crate::source::{FileStat, FileWalker};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// One content file, keyed by the calendar date it was filed under. The
/// field order is the sort order: year-month, then year-month-day, then
/// timestamp, then path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    /// `YYYY-MM`
    pub year_month: String,

    /// `YYYY-MM-DD`
    pub year_month_day: String,

    pub timestamp: NaiveDateTime,

    pub path: PathBuf,
}

impl Item {
    pub fn new(path: PathBuf, timestamp: NaiveDateTime) -> Item {
        Item {
            year_month: timestamp.format("%Y-%m").to_string(),
            year_month_day: timestamp.format("%Y-%m-%d").to_string(),
            timestamp,
            path,
        }
    }
}

/// Maps each year that has at least one entry to its navigation link.
#[derive(Debug, Default, PartialEq)]
pub struct ArchiveIndex {
    links: BTreeMap<String, String>,
}

impl ArchiveIndex {
    /// Records the link for `year` unless one is already present.
    fn insert(&mut self, year: &str, base_url: &str) {
        self.links
            .entry(year.to_owned())
            .or_insert_with(|| format!("<a href=\"{}/{}/\">{}</a><br>", base_url, year, year));
    }

    /// Years with entries, most recent first.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.links.keys().rev().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Renders the links one per line, most recent year first. This is the
    /// `archivelinks` template variable.
    pub fn render(&self) -> String {
        self.links
            .values()
            .rev()
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

/// Walks `root` and stats every content file beneath it. Returns the year
/// index along with one [`Item`] per file, in walk order. `base_url` should
/// not end with a slash.
pub fn build(
    walker: &dyn FileWalker,
    stat: &dyn FileStat,
    root: &Path,
    base_url: &str,
) -> Result<(ArchiveIndex, Vec<Item>)> {
    let mut index = ArchiveIndex::default();
    let mut items = Vec::new();

    for path in walker.walk(root) {
        let timestamp = stat.stat(&path).map_err(|err| Error::Stat {
            path: path.clone(),
            err,
        })?;
        index.insert(&timestamp.format("%Y").to_string(), base_url);
        items.push(Item::new(path, timestamp));
    }

    log::debug!(
        "Indexed {} entries across {} years under '{}'",
        items.len(),
        index.links.len(),
        root.display()
    );
    Ok((index, items))
}

/// The result of building an archive.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error building an archive.
#[derive(Debug)]
pub enum Error {
    /// Returned when a content file's timestamp can't be read.
    Stat { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Stat { path, err } => {
                write!(f, "Reading timestamp of '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Stat { path: _, err } => Some(err),
        }
    }
}
