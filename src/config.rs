//! Loads the blog configuration from an `annals.yaml` project file.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file [`Config::from_directory`] searches for.
pub const PROJECT_FILE: &str = "annals.yaml";

#[derive(Deserialize)]
struct Project {
    #[serde(default = "default_datadir")]
    datadir: PathBuf,

    #[serde(default)]
    base_url: Option<Url>,

    #[serde(default = "default_flavour")]
    default_flavour: String,

    #[serde(default = "default_blog_title")]
    blog_title: String,

    #[serde(default = "default_num_entries")]
    num_entries: usize,

    #[serde(default)]
    theme_directory: Option<PathBuf>,

    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
}

fn default_datadir() -> PathBuf {
    PathBuf::from("entries")
}

fn default_flavour() -> String {
    String::from("html")
}

fn default_blog_title() -> String {
    String::from("annals")
}

fn default_num_entries() -> usize {
    10
}

fn default_extensions() -> Vec<String> {
    vec![String::from("txt"), String::from("md")]
}

/// The resolved configuration. Relative directories in the project file are
/// resolved against the directory containing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The root of the content files.
    pub datadir: PathBuf,

    /// The site's base URL without a trailing slash, or empty when the
    /// project file doesn't set one.
    pub base_url: String,

    /// The flavour used when a request doesn't name one.
    pub default_flavour: String,

    pub blog_title: String,

    /// The number of entries on a category page.
    pub num_entries: usize,

    /// Where flavour templates live. Built-in templates are used when this
    /// is unset or a template file is missing.
    pub theme_directory: Option<PathBuf>,

    /// The file extensions that mark content files.
    pub extensions: Vec<String>,
}

impl Config {
    /// Finds `annals.yaml` in `dir` or the nearest ancestor and loads it.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.is_file() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(Error::NotFound),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        let project_root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Config::from_project(project, project_root))
    }

    /// Parses a project file's contents, resolving relative directories
    /// against `project_root`.
    pub fn from_yaml(input: &str, project_root: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_str(input)?;
        Ok(Config::from_project(project, project_root))
    }

    fn from_project(project: Project, project_root: &Path) -> Config {
        Config {
            datadir: project_root.join(project.datadir),
            base_url: match project.base_url {
                Some(url) => url.as_str().trim_end_matches('/').to_owned(),
                None => String::new(),
            },
            default_flavour: project.default_flavour,
            blog_title: project.blog_title,
            num_entries: project.num_entries,
            theme_directory: project
                .theme_directory
                .map(|dir| project_root.join(dir)),
            extensions: project.extensions,
        }
    }
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when no directory up to the filesystem root has an
    /// `annals.yaml`.
    NotFound,

    /// Returned when the project file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid YAML or has bad values.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::Open { path, err } => {
                write!(f, "Opening project file `{}`: {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => write!(f, "Loading configuration: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}
