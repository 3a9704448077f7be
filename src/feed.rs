//! Renders a page's entries as an Atom feed. This is what the `atom`
//! flavour produces in place of templates.

use crate::config::Config;
use crate::entry::Entry;
use atom_syndication::{Content, Entry as AtomEntry, Error as AtomError, Feed, Link};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::io::Write;

/// The flavour rendered as Atom.
pub const ATOM_FLAVOUR: &str = "atom";

/// Creates a feed for `entries` and writes it to `w`. `feed_url` becomes
/// the feed ID and its `self` link.
pub fn write_feed<W: Write>(config: &Config, feed_url: &str, entries: &[Entry], w: W) -> Result<()> {
    feed(config, feed_url, entries).write_to(w)?;
    Ok(())
}

fn feed(config: &Config, feed_url: &str, entries: &[Entry]) -> Feed {
    let mut feed = Feed::default();
    feed.set_title(config.blog_title.as_str());
    feed.set_id(feed_url);
    feed.set_updated(match entries.iter().map(|e| e.timestamp).max() {
        Some(latest) => utc(&latest),
        None => Utc::now().into(),
    });
    feed.set_links(vec![
        link(&format!("{}/", config.base_url), "alternate"),
        link(feed_url, "self"),
    ]);
    feed.set_entries(
        entries
            .iter()
            .map(|entry| feed_entry(config, entry))
            .collect::<Vec<AtomEntry>>(),
    );
    feed
}

fn feed_entry(config: &Config, entry: &Entry) -> AtomEntry {
    // Entry links point at the default flavour's page rather than back into
    // the feed.
    let url = format!(
        "{}/{}.{}",
        config.base_url, entry.file_path, config.default_flavour
    );
    let date = utc(&entry.timestamp);

    let mut content = Content::default();
    content.set_content_type("html".to_owned());
    content.set_value(entry.body.clone());

    let mut feed_entry = AtomEntry::default();
    feed_entry.set_id(url.as_str());
    feed_entry.set_title(entry.title.as_str());
    feed_entry.set_updated(date);
    feed_entry.set_published(date);
    feed_entry.set_links(vec![link(&url, "alternate")]);
    feed_entry.set_content(content);
    feed_entry
}

fn link(href: &str, rel: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel(rel);
    link
}

// Entry timestamps carry no zone; they're published as UTC.
fn utc(timestamp: &NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(timestamp).into()
}

/// The result of writing a feed.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem writing a feed.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is an Atom-related error.
    Atom(AtomError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Atom(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Atom(err) => Some(err),
        }
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::archive::test::datetime;
    use crate::summary::SummaryEntry;
    use std::path::Path;

    #[test]
    fn test_write_feed() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_yaml(
            "base_url: http://example.com\nblog_title: Notes",
            Path::new("/"),
        )?;
        let mut entry: Entry = SummaryEntry::new("2004-07", "<tr></tr>".to_owned())?.into();
        entry.timestamp = datetime("2004-07-01 00:00");

        let mut out = Vec::new();
        write_feed(&config, "http://example.com/2004/index.atom", &[entry], &mut out)?;
        let out = String::from_utf8(out)?;

        assert!(out.contains(">Notes</title>"));
        assert!(out.contains("<id>http://example.com/2004/index.atom</id>"));
        assert!(out.contains("<id>http://example.com/2004-07.html</id>"));
        assert!(out.contains(">2004-07</title>"));
        assert!(out.contains("2004-07-01T00:00:00"));
        assert!(out.contains("&lt;tr&gt;&lt;/tr&gt;"));
        Ok(())
    }
}
