//! Exports [`Blog`], which answers a request path with a rendered page:
//! it runs every plugin's hooks, takes the first plugin-provided file list
//! (falling back to its own listing of the data directory), and renders the
//! entries through the flavour's templates or as an Atom feed.

use crate::archive::{self, ArchiveIndex};
use crate::config::Config;
use crate::entry::{self, Entry};
use crate::feed::{self, ATOM_FLAVOUR};
use crate::plugin::{self, DateHead, Plugin};
use crate::render::{self, Theme};
use crate::request::{Request, FLAVOUR};
use crate::source::{FileStat, FileWalker, MtimeStat, WalkDirWalker};
use crate::yeararchives::YearArchives;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Blog {
    config: Config,
    walker: Arc<dyn FileWalker>,
    stat: Arc<dyn FileStat>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Blog {
    /// Creates a blog reading content files from disk, with the year
    /// archives plugin registered.
    pub fn new(config: Config) -> Blog {
        let walker = Arc::new(WalkDirWalker::new(config.extensions.iter().cloned()));
        Blog::with_sources(config, walker, Arc::new(MtimeStat))
    }

    /// Like [`Blog::new`], but lists and dates content files through the
    /// given collaborators.
    pub fn with_sources(
        config: Config,
        walker: Arc<dyn FileWalker>,
        stat: Arc<dyn FileStat>,
    ) -> Blog {
        let year_archives = YearArchives::new(walker.clone(), stat.clone());
        Blog {
            config,
            walker,
            stat,
            plugins: vec![Box::new(year_archives)],
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a plugin after the ones already present. Plugins are
    /// consulted in registration order.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// The years with entries, along with their navigation links.
    pub fn archive_index(&self) -> Result<ArchiveIndex> {
        let year_archives = YearArchives::new(self.walker.clone(), self.stat.clone());
        let (index, _) = year_archives.archive(&self.config)?;
        Ok(index)
    }

    /// Renders the page for `path_info` into `w`.
    pub fn handle<W: Write>(&self, path_info: &str, w: &mut W) -> Result<()> {
        let mut request = Request::new(&self.config, path_info);
        for plugin in &self.plugins {
            plugin.prepare(&mut request)?;
        }

        let entries = self.entries(&mut request)?;
        let flavour = request.flavour().to_owned();
        log::debug!(
            "Rendering {} entries for '{}' as {}",
            entries.len(),
            path_info,
            flavour
        );

        if flavour == ATOM_FLAVOUR {
            let feed_url = format!(
                "{}/{}",
                self.config.base_url,
                path_info.trim_start_matches('/')
            );
            feed::write_feed(&self.config, &feed_url, &entries, w)?;
            return Ok(());
        }

        let date_heads = !self
            .plugins
            .iter()
            .any(|plugin| plugin.date_head(&request) == DateHead::Suppress);
        let theme = Theme::load(self.config.theme_directory.as_deref(), &flavour)?;

        let mut variables = request.data.clone();
        variables
            .entry("blog_title".to_owned())
            .or_insert_with(|| self.config.blog_title.clone());
        variables
            .entry("base_url".to_owned())
            .or_insert_with(|| self.config.base_url.clone());
        variables.insert(FLAVOUR.to_owned(), flavour);

        render::write_page(w, &theme, &variables, &entries, date_heads)?;
        Ok(())
    }

    fn entries(&self, request: &mut Request) -> Result<Vec<Entry>> {
        for plugin in &self.plugins {
            if let Some(entries) = plugin.filelist(request)? {
                log::debug!("Plugin '{}' provided {} entries", plugin.name(), entries.len());
                return Ok(entries);
            }
        }
        self.default_filelist(request)
    }

    /// Lists the entry or category named by the request path. A trailing
    /// `name.flavour` segment picks the flavour; `index` names the category
    /// itself.
    fn default_filelist(&self, request: &mut Request) -> Result<Vec<Entry>> {
        let path_info = request.path_info().to_owned();
        let mut segments: Vec<&str> = path_info
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .collect();

        if let Some(last) = segments.pop() {
            let stem = match last.find('.') {
                Some(i) => {
                    request
                        .data
                        .insert(FLAVOUR.to_owned(), last[i + 1..].to_owned());
                    &last[..i]
                }
                None => last,
            };
            if stem != "index" && !stem.is_empty() {
                segments.push(stem);
            }
        }

        let target: PathBuf = self.config.datadir.join(segments.iter().collect::<PathBuf>());
        if !segments.is_empty() {
            for extension in &self.config.extensions {
                let file = with_suffix(&target, extension);
                if file.is_file() {
                    return Ok(vec![self.load(&file)?]);
                }
            }
        }

        let mut entries = Vec::new();
        for file in self.walker.walk(&target) {
            entries.push(self.load(&file)?);
        }
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(self.config.num_entries);
        Ok(entries)
    }

    fn load(&self, file: &Path) -> Result<Entry> {
        let timestamp = self.stat.stat(file).map_err(|err| archive::Error::Stat {
            path: file.to_owned(),
            err,
        })?;
        Ok(Entry::load(file, &self.config.datadir, timestamp)?)
    }
}

// `with_extension` would clobber anything after a dot in the final segment.
fn with_suffix(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// The result of handling a request.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error handling a request.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors raised by plugin hooks.
    Plugin(plugin::Error),

    /// Returned when the archive couldn't be built.
    Archive(archive::Error),

    /// Returned when an entry couldn't be loaded.
    Entry(entry::Error),

    /// Returned for errors rendering templates.
    Render(render::Error),

    /// Returned for errors writing the feed.
    Feed(feed::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Plugin(err) => err.fmt(f),
            Error::Archive(err) => err.fmt(f),
            Error::Entry(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Plugin(err) => Some(err),
            Error::Archive(err) => Some(err),
            Error::Entry(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::Feed(err) => Some(err),
        }
    }
}

impl From<plugin::Error> for Error {
    /// Converts [`plugin::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: plugin::Error) -> Error {
        Error::Plugin(err)
    }
}

impl From<archive::Error> for Error {
    /// Converts [`archive::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: archive::Error) -> Error {
        Error::Archive(err)
    }
}

impl From<entry::Error> for Error {
    /// Converts [`entry::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: entry::Error) -> Error {
        Error::Entry(err)
    }
}

impl From<render::Error> for Error {
    /// Converts [`render::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: render::Error) -> Error {
        Error::Render(err)
    }
}

impl From<feed::Error> for Error {
    /// Converts [`feed::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: feed::Error) -> Error {
        Error::Feed(err)
    }
}
