//! Exports the [`build_archives`] function, which renders the front page and
//! every year archive page to static files.

use crate::blog::{Blog, Error as BlogError};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Renders `/` to `{output_directory}/index.{flavour}` and each year's
/// archive to `{output_directory}/{year}/index.{flavour}`, using the default
/// flavour. Any previous contents of `output_directory` are removed first.
/// Returns the number of pages written.
pub fn build_archives(blog: &Blog, output_directory: &Path) -> Result<usize> {
    let index = blog.archive_index()?;
    let file_name = format!("index.{}", blog.config().default_flavour);

    // Blow away the old output so pages for years that no longer have
    // entries don't linger.
    rmdir(output_directory)?;
    std::fs::create_dir_all(output_directory)?;

    write_page(blog, "/", &output_directory.join(&file_name))?;
    let mut pages = 1;
    for year in index.years() {
        let dir = output_directory.join(year);
        std::fs::create_dir_all(&dir)?;
        write_page(blog, &format!("/{}/", year), &dir.join(&file_name))?;
        pages += 1;
    }

    log::info!(
        "Wrote {} pages to '{}'",
        pages,
        output_directory.display()
    );
    Ok(pages)
}

fn write_page(blog: &Blog, path_info: &str, file_path: &Path) -> Result<()> {
    log::debug!("Rendering '{}' to '{}'", path_info, file_path.display());
    let mut w = BufWriter::new(File::create(file_path)?);
    blog.handle(path_info, &mut w)?;
    w.flush()?;
    Ok(())
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

/// The result of a build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building static pages.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors rendering a page.
    Blog(BlogError),

    /// Returned for I/O problems while cleaning the output directory.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Blog(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Blog(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<BlogError> for Error {
    /// Converts [`BlogError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: BlogError) -> Error {
        Error::Blog(err)
    }
}
