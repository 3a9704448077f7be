//! Year-based archives. Every page gets an `archivelinks` template variable
//! linking each year that has entries, most recent first. Requests for
//! `/<year>/` (optionally `/<year>/index.<flavour>`) are answered with one
//! summary entry per month of that year, rendered with the
//! `yearsummarystory` template. A typical one:
//!
//! ```html
//! <div class="blosxomEntry">
//! <span class="blosxomTitle">{{.title}}</span>
//! <div class="blosxomBody">
//! <table>
//! {{.body}}
//! </table>
//! </div>
//! </div>
//! ```

use crate::archive::{self, ArchiveIndex, Item};
use crate::config::Config;
use crate::entry::Entry;
use crate::group::group;
use crate::path::{parse_path_info, ArchivePath};
use crate::plugin::{DateHead, Plugin, Result};
use crate::request::{Request, FLAVOUR};
use crate::source::{FileStat, FileWalker};
use crate::summary::SummaryEntry;
use std::sync::Arc;

/// The `data` key holding the rendered year links.
pub const ARCHIVE_LINKS: &str = "archivelinks";

pub struct YearArchives {
    walker: Arc<dyn FileWalker>,
    stat: Arc<dyn FileStat>,
}

impl YearArchives {
    pub fn new(walker: Arc<dyn FileWalker>, stat: Arc<dyn FileStat>) -> YearArchives {
        YearArchives { walker, stat }
    }

    /// Builds the year index and item list from the data directory.
    pub fn archive(&self, config: &Config) -> archive::Result<(ArchiveIndex, Vec<Item>)> {
        archive::build(
            self.walker.as_ref(),
            self.stat.as_ref(),
            &config.datadir,
            &config.base_url,
        )
    }
}

/// Renders the link line for one entry of a day row.
fn link_line(base_url: &str, entry: &Entry, flavour: &str) -> String {
    format!(
        "({}) <a href=\"{}/{}.{}\">{}</a><br>",
        entry.path, base_url, entry.file_path, flavour, entry.title
    )
}

impl Plugin for YearArchives {
    fn name(&self) -> &str {
        "yeararchives"
    }

    /// Publishes [`ARCHIVE_LINKS`]. The links are built at most once per
    /// request.
    fn prepare(&self, request: &mut Request) -> Result<()> {
        if !request.data.contains_key(ARCHIVE_LINKS) {
            let (index, _) = self.archive(request.config)?;
            request.data.insert(ARCHIVE_LINKS.to_owned(), index.render());
        }
        Ok(())
    }

    /// Year archive pages carry their dates in the summaries, so the date
    /// header is dropped.
    fn date_head(&self, request: &Request) -> DateHead {
        if request.year_archives_initiated() {
            DateHead::Suppress
        } else {
            DateHead::Render
        }
    }

    fn filelist(&self, request: &mut Request) -> Result<Option<Vec<Entry>>> {
        let ArchivePath { year, flavour } = match parse_path_info(request.path_info()) {
            Some(archive_path) => archive_path,
            None => return Ok(None),
        };

        request.mark_year_archives_initiated();
        let (_, items) = self.archive(request.config)?;

        let flavour = match flavour {
            Some(flavour) => flavour,
            None => request.flavour().to_owned(),
        };
        request.data.insert(FLAVOUR.to_owned(), flavour.clone());

        let config = request.config;
        let months = group(&items, &year, |item| -> Result<String> {
            let entry = Entry::load(&item.path, &config.datadir, item.timestamp)?;
            Ok(link_line(&config.base_url, &entry, &flavour))
        })?;
        log::debug!("Year {} has {} months with entries", year, months.len());

        let mut entries = Vec::with_capacity(months.len());
        for month in months {
            entries.push(SummaryEntry::new(&month.year_month, month.body)?.into());
        }
        Ok(Some(entries))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::archive::test::FakeSource;
    use std::fs;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: Config,
        plugin: YearArchives,
    }

    /// Writes each `(relative path, title, timestamp)` under a temporary
    /// data directory and serves the timestamps from a fake stat.
    fn fixture(base_url: &str, files: &[(&str, &str, &str)]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let datadir = dir.path().join("entries");
        let mut stamps = Vec::new();
        for (relative, title, ts) in files {
            let path = datadir.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("{}\nbody\n", title)).unwrap();
            stamps.push((path.to_string_lossy().into_owned(), *ts));
        }
        let stamps: Vec<(&str, &str)> = stamps.iter().map(|(p, t)| (p.as_str(), *t)).collect();
        let source = Arc::new(FakeSource::new(&stamps));

        let yaml = match base_url {
            "" => String::from("{}"),
            url => format!("base_url: {}", url),
        };
        Fixture {
            config: Config::from_yaml(&yaml, dir.path()).unwrap(),
            plugin: YearArchives::new(source.clone(), source),
            _dir: dir,
        }
    }

    fn scenario(base_url: &str) -> Fixture {
        fixture(
            base_url,
            &[
                ("first.txt", "First", "2004-07-01 10:00"),
                ("dev/second.txt", "Second", "2004-07-02 10:00"),
                ("third.txt", "Third", "2004-08-15 10:00"),
                ("old.txt", "Old", "2002-03-04 10:00"),
            ],
        )
    }

    #[test]
    fn test_prepare_publishes_links_once() -> Result<()> {
        let f = scenario("http://example.com/");
        let mut request = Request::new(&f.config, "/");
        f.plugin.prepare(&mut request)?;
        assert_eq!(
            request.data[ARCHIVE_LINKS],
            "<a href=\"http://example.com/2004/\">2004</a><br>\n\
             <a href=\"http://example.com/2002/\">2002</a><br>"
        );

        request.data.insert(ARCHIVE_LINKS.to_owned(), "cached".to_owned());
        f.plugin.prepare(&mut request)?;
        assert_eq!(request.data[ARCHIVE_LINKS], "cached");
        Ok(())
    }

    #[test]
    fn test_filelist_ignores_other_paths() -> Result<()> {
        let f = scenario("");
        for path in &["/", "/dev/second.html", "/2004/07"] {
            let mut request = Request::new(&f.config, path);
            assert!(f.plugin.filelist(&mut request)?.is_none());
            assert!(!request.year_archives_initiated());
            assert_eq!(f.plugin.date_head(&request), DateHead::Render);
        }
        Ok(())
    }

    #[test]
    fn test_filelist_year() -> Result<()> {
        let f = scenario("http://example.com");
        let mut request = Request::new(&f.config, "/2004/");
        let entries = f.plugin.filelist(&mut request)?.unwrap();

        assert!(request.year_archives_initiated());
        assert_eq!(f.plugin.date_head(&request), DateHead::Suppress);
        assert_eq!(request.data[FLAVOUR], "html");

        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2004-08::summary", "2004-07::summary"]);

        assert_eq!(
            entries[0].body,
            "<tr>\n<td valign=\"top\" align=\"left\">2004-08-15</td>\n\
             <td>() <a href=\"http://example.com/third.html\">Third</a><br></td></tr>\n"
        );
        assert_eq!(
            entries[1].body,
            "<tr>\n<td valign=\"top\" align=\"left\">2004-07-02</td>\n\
             <td>(dev) <a href=\"http://example.com/dev/second.html\">Second</a><br></td></tr>\n\
             \n\
             <tr>\n<td valign=\"top\" align=\"left\">2004-07-01</td>\n\
             <td>() <a href=\"http://example.com/first.html\">First</a><br></td></tr>\n"
        );
        Ok(())
    }

    #[test]
    fn test_filelist_flavour() -> Result<()> {
        let f = scenario("");
        let mut request = Request::new(&f.config, "/2002/index.rss");
        let entries = f.plugin.filelist(&mut request)?.unwrap();
        assert_eq!(request.data[FLAVOUR], "rss");
        assert!(entries[0].body.contains("<a href=\"/old.rss\">Old</a>"));

        // An earlier plugin's flavour wins over the default.
        let mut request = Request::new(&f.config, "/2002");
        request.data.insert(FLAVOUR.to_owned(), "txt".to_owned());
        let entries = f.plugin.filelist(&mut request)?.unwrap();
        assert!(entries[0].body.contains("<a href=\"/old.txt\">Old</a>"));
        Ok(())
    }

    #[test]
    fn test_filelist_survives_non_utf8_entry() -> Result<()> {
        let f = fixture(
            "",
            &[
                ("good.txt", "Good", "2004-07-01 10:00"),
                ("latin1.txt", "Latin-1", "2004-07-02 10:00"),
            ],
        );
        fs::write(f.config.datadir.join("latin1.txt"), b"Caf\xe9\nbody\n").unwrap();

        let mut request = Request::new(&f.config, "/2004/");
        let entries = f.plugin.filelist(&mut request)?.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].body.contains("<a href=\"/latin1.html\">Caf\u{FFFD}</a>"));
        assert!(entries[0].body.contains("<a href=\"/good.html\">Good</a>"));
        Ok(())
    }

    #[test]
    fn test_filelist_empty_year() -> Result<()> {
        let f = scenario("");
        let mut request = Request::new(&f.config, "/1999/");
        assert_eq!(f.plugin.filelist(&mut request)?, Some(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_link_line() {
        let entry = Entry {
            id: "a/b".to_owned(),
            title: "B".to_owned(),
            body: String::new(),
            timestamp: crate::archive::test::datetime("2004-07-01 10:00"),
            path: "a".to_owned(),
            file_path: "a/b".to_owned(),
            template_name: "story".to_owned(),
            nocomments: false,
        };
        assert_eq!(
            link_line("http://x", &entry, "html"),
            "(a) <a href=\"http://x/a/b.html\">B</a><br>"
        );
    }
}
