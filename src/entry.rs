//! Defines [`Entry`], the unit of renderable content. Entries are either
//! loaded from content files ([`Entry::load`]) or synthesized by plugins
//! (e.g. from a [`SummaryEntry`]).

use crate::markdown;
use crate::summary::SummaryEntry;
use chrono::NaiveDateTime;
use gtmpl::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// The template regular entries are rendered with.
pub const STORY_TEMPLATE: &str = "story";

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub id: String,
    pub title: String,

    /// Rendered HTML.
    pub body: String,

    pub timestamp: NaiveDateTime,

    /// The category: the entry's directory relative to the data directory,
    /// `/`-separated and empty at the root.
    pub path: String,

    /// The entry's path relative to the data directory, without extension.
    /// Entry permalinks are `{base_url}/{file_path}.{flavour}`.
    pub file_path: String,

    pub template_name: String,

    pub nocomments: bool,
}

impl Entry {
    /// Loads the content file at `file`. The first line is the title and the
    /// rest is the body; `.md` bodies are converted from markdown, anything
    /// else is taken as HTML. Bytes that aren't UTF-8 are replaced with
    /// U+FFFD rather than failing the page the entry appears on.
    pub fn load(file: &Path, datadir: &Path, timestamp: NaiveDateTime) -> Result<Entry> {
        let bytes = fs::read(file).map_err(|err| Error::Read {
            path: file.to_owned(),
            err,
        })?;
        let contents = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = contents {
            log::warn!("Entry '{}' is not valid UTF-8", file.display());
        }
        let (title, rest) = match contents.find('\n') {
            Some(i) => (&contents[..i], &contents[i + 1..]),
            None => (&contents[..], ""),
        };

        let relative = file
            .strip_prefix(datadir)
            .map_err(|_| Error::OutsideDatadir(file.to_owned()))?;
        let file_path = slash_path(&relative.with_extension(""));
        let path = match relative.parent() {
            Some(parent) => slash_path(parent),
            None => String::new(),
        };

        let body = match file.extension().and_then(|ext| ext.to_str()) {
            Some("md") => {
                let mut body = String::new();
                markdown::to_html(&mut body, rest);
                body
            }
            _ => rest.to_owned(),
        };

        Ok(Entry {
            id: file_path.clone(),
            title: title.trim().to_owned(),
            body,
            timestamp,
            path,
            file_path,
            template_name: STORY_TEMPLATE.to_owned(),
            nocomments: false,
        })
    }

    /// The heading shown by the `date_head` template, e.g.
    /// `Thu, 01 Jul 2004`.
    pub fn date(&self) -> String {
        self.timestamp.format("%a, %d %b %Y").to_string()
    }
}

// Joins path components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl From<SummaryEntry> for Entry {
    fn from(summary: SummaryEntry) -> Entry {
        Entry {
            id: summary.id,
            title: summary.title,
            body: summary.body,
            timestamp: summary.timestamp,
            path: String::new(),
            file_path: summary.file_path,
            template_name: summary.template_name.to_owned(),
            nocomments: summary.nocomments,
        }
    }
}

impl From<&Entry> for Value {
    /// Converts [`Entry`]s into [`Value`]s for templating.
    fn from(entry: &Entry) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), Value::String(entry.id.clone()));
        m.insert("title".to_owned(), Value::String(entry.title.clone()));
        m.insert("body".to_owned(), Value::String(entry.body.clone()));
        m.insert("path".to_owned(), Value::String(entry.path.clone()));
        m.insert("file_path".to_owned(), Value::String(entry.file_path.clone()));
        m.insert("date".to_owned(), Value::String(entry.date()));
        m.insert(
            "ymd".to_owned(),
            Value::String(entry.timestamp.format("%Y-%m-%d").to_string()),
        );
        m.insert("nocomments".to_owned(), Value::Bool(entry.nocomments));
        Value::Object(m)
    }
}

/// The result of loading an [`Entry`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading an [`Entry`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the content file can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when the content file isn't beneath the data directory.
    OutsideDatadir(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "Reading entry '{}': {}", path.display(), err)
            }
            Error::OutsideDatadir(path) => {
                write!(f, "Entry '{}' is outside the data directory", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::OutsideDatadir(_) => None,
        }
    }
}
