//! Defines [`Request`], the per-request state handed to plugins.

use crate::config::Config;
use std::collections::HashMap;

/// The `http` key holding the request path.
pub const PATH_INFO: &str = "PATH_INFO";

/// The `data` key holding the flavour the page is rendered in.
pub const FLAVOUR: &str = "flavour";

/// One request, from plugin preparation through rendering. Nothing here
/// outlives the request.
pub struct Request<'a> {
    pub config: &'a Config,

    /// HTTP-style request metadata, e.g. [`PATH_INFO`].
    pub http: HashMap<String, String>,

    /// Values shared between plugins and exposed to templates.
    pub data: HashMap<String, String>,

    year_archives_initiated: bool,
}

impl<'a> Request<'a> {
    pub fn new(config: &'a Config, path_info: &str) -> Request<'a> {
        let mut http = HashMap::new();
        http.insert(PATH_INFO.to_owned(), path_info.to_owned());
        Request {
            config,
            http,
            data: HashMap::new(),
            year_archives_initiated: false,
        }
    }

    pub fn path_info(&self) -> &str {
        self.http.get(PATH_INFO).map(String::as_str).unwrap_or("")
    }

    /// The flavour chosen for this request so far, falling back to the
    /// configured default.
    pub fn flavour(&self) -> &str {
        match self.data.get(FLAVOUR) {
            Some(flavour) => flavour,
            None => &self.config.default_flavour,
        }
    }

    /// Whether a year archive page is being produced for this request.
    pub fn year_archives_initiated(&self) -> bool {
        self.year_archives_initiated
    }

    /// Marks this request as producing a year archive page. There is no way
    /// to unset it.
    pub fn mark_year_archives_initiated(&mut self) {
        self.year_archives_initiated = true;
    }
}
