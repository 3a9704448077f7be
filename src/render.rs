//! Renders a page of [`Entry`]s through the flavour's templates. A page is
//! the `head` template, then for each entry an optional `date_head` and the
//! entry's own template (`story` or e.g. `yearsummarystory`), then `foot`.
//!
//! Templates use [`gtmpl`] (Go template) syntax and are looked up as
//! `{theme_directory}/{name}.{flavour}`. Missing files fall back to the
//! built-in HTML templates below.

use crate::entry::{Entry, STORY_TEMPLATE};
use crate::summary;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const HEAD: &str = "head";
const DATE_HEAD: &str = "date_head";
const FOOT: &str = "foot";

const DEFAULT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head><title>{{.blog_title}}</title></head>
<body>
<h1><a href="{{.base_url}}/">{{.blog_title}}</a></h1>
<div class="archives">
{{.archivelinks}}
</div>
"#;

const DEFAULT_DATE_HEAD: &str = "<h2>{{.date}}</h2>\n";

const DEFAULT_STORY: &str = r#"<div class="entry">
<h3><a href="{{.base_url}}/{{.file_path}}.{{.flavour}}">{{.title}}</a></h3>
{{.body}}
</div>
"#;

const DEFAULT_SUMMARY_STORY: &str = r#"<div class="blosxomEntry">
<span class="blosxomTitle">{{.title}}</span>
<div class="blosxomBody">
<table>
{{.body}}
</table>
</div>
</div>
"#;

const DEFAULT_FOOT: &str = "</body>\n</html>\n";

const TEMPLATES: [(&str, &str); 5] = [
    (HEAD, DEFAULT_HEAD),
    (DATE_HEAD, DEFAULT_DATE_HEAD),
    (STORY_TEMPLATE, DEFAULT_STORY),
    (summary::TEMPLATE_NAME, DEFAULT_SUMMARY_STORY),
    (FOOT, DEFAULT_FOOT),
];

/// The parsed templates for one flavour.
pub struct Theme {
    templates: HashMap<&'static str, Template>,
}

impl Theme {
    /// Loads the templates for `flavour` from `theme_directory`, using the
    /// built-in template for any file that doesn't exist.
    pub fn load(theme_directory: Option<&Path>, flavour: &str) -> Result<Theme> {
        let mut templates = HashMap::new();
        for (name, default) in TEMPLATES.iter() {
            let source = match theme_directory {
                Some(dir) => read_template(&dir.join(format!("{}.{}", name, flavour)))?,
                None => None,
            };
            let mut template = Template::default();
            template
                .parse(source.as_deref().unwrap_or(*default))
                .map_err(|err| Error::ParseTemplate {
                    name: (*name).to_owned(),
                    err,
                })?;
            templates.insert(*name, template);
        }
        Ok(Theme { templates })
    }

    fn template(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| Error::UnknownTemplate(name.to_owned()))
    }
}

fn read_template(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(source) => Ok(Some(source)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::OpenTemplateFile {
            path: path.to_owned(),
            err,
        }),
    }
}

/// Writes a page to `w`. `variables` are visible to every template; entry
/// templates additionally see the entry's fields. The date header is
/// rendered whenever the date changes from one entry to the next, unless
/// `date_heads` is false.
pub fn write_page<W: Write>(
    w: &mut W,
    theme: &Theme,
    variables: &HashMap<String, String>,
    entries: &[Entry],
    date_heads: bool,
) -> Result<()> {
    let page: HashMap<String, Value> = variables
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    execute(w, theme.template(HEAD)?, Value::Object(page.clone()))?;

    let mut last_date: Option<String> = None;
    for entry in entries {
        let mut fields = page.clone();
        if let Value::Object(entry_fields) = Value::from(entry) {
            fields.extend(entry_fields);
        }
        let value = Value::Object(fields);

        let date = entry.date();
        if date_heads && last_date.as_ref() != Some(&date) {
            execute(w, theme.template(DATE_HEAD)?, value.clone())?;
        }
        last_date = Some(date);

        execute(w, theme.template(&entry.template_name)?, value)?;
    }

    execute(w, theme.template(FOOT)?, Value::Object(page))
}

fn execute<W: Write>(w: &mut W, template: &Template, value: Value) -> Result<()> {
    let context = gtmpl::Context::from(value).map_err(Error::Template)?;
    template.execute(w, &context).map_err(Error::Template)
}

/// The result of rendering a page.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering a page.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate { name: String, err: String },

    /// Returned when an entry asks for a template the theme doesn't have.
    UnknownTemplate(String),

    /// Returned for errors during templating.
    Template(String),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate { name, err } => {
                write!(f, "Parsing template '{}': {}", name, err)
            }
            Error::UnknownTemplate(name) => write!(f, "Unknown template '{}'", name),
            Error::Template(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate { .. } => None,
            Error::UnknownTemplate(_) => None,
            Error::Template(_) => None,
        }
    }
}
