//! Defines the [`Plugin`] trait: the callback hooks the host runs while
//! processing a [`Request`].

use crate::entry::{self, Entry};
use crate::request::Request;
use crate::{archive, summary};
use std::fmt;

/// Whether the host should render the date header template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateHead {
    Render,
    Suppress,
}

/// A set of callbacks the host invokes for every request. Every hook has a
/// do-nothing default.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Runs before the file list is produced. Plugins typically publish
    /// template variables into [`Request::data`] here.
    fn prepare(&self, _request: &mut Request) -> Result<()> {
        Ok(())
    }

    /// Asked before each date header is rendered.
    fn date_head(&self, _request: &Request) -> DateHead {
        DateHead::Render
    }

    /// Produces the entries for the page. `None` defers to the next plugin
    /// and finally to the host's own listing.
    fn filelist(&self, _request: &mut Request) -> Result<Option<Vec<Entry>>> {
        Ok(None)
    }
}

/// The result of a plugin callback.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error raised by a plugin callback.
#[derive(Debug)]
pub enum Error {
    /// Returned when the archive couldn't be built.
    Archive(archive::Error),

    /// Returned when an entry couldn't be loaded.
    Entry(entry::Error),

    /// Returned when a summary key is malformed.
    Format(summary::FormatError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Archive(err) => err.fmt(f),
            Error::Entry(err) => err.fmt(f),
            Error::Format(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Archive(err) => Some(err),
            Error::Entry(err) => Some(err),
            Error::Format(err) => Some(err),
        }
    }
}

impl From<archive::Error> for Error {
    fn from(err: archive::Error) -> Error {
        Error::Archive(err)
    }
}

impl From<entry::Error> for Error {
    fn from(err: entry::Error) -> Error {
        Error::Entry(err)
    }
}

impl From<summary::FormatError> for Error {
    fn from(err: summary::FormatError) -> Error {
        Error::Format(err)
    }
}
