//! Recognizes year-archive request paths such as `/2003/` or
//! `/2003/index.rss`.

/// A successfully parsed year-archive path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchivePath {
    /// The four-digit year, e.g. `2003`.
    pub year: String,

    /// The flavour named by an `index.<flavour>` segment, if any.
    pub flavour: Option<String>,
}

impl ArchivePath {
    fn new(year: &str, flavour: Option<&str>) -> ArchivePath {
        ArchivePath {
            year: year.to_owned(),
            flavour: flavour.map(str::to_owned),
        }
    }
}

/// Parses a `PATH_INFO` value into an [`ArchivePath`]. Handles:
///
/// * `/2003`
/// * `/2003/`
/// * `/2003/index`
/// * `/2003/index.flav`
///
/// Empty segments are ignored, so leading, trailing, and doubled slashes
/// don't matter. Anything else returns `None`.
pub fn parse_path_info(path: &str) -> Option<ArchivePath> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let year = *segments.first()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match segments.as_slice() {
        [_] => Some(ArchivePath::new(year, None)),
        [_, index] if index.starts_with("index") => {
            // Everything after the first `.` is the flavour, so
            // `index.tar.gz` yields `tar.gz`.
            let flavour = index.splitn(2, '.').nth(1);
            Some(ArchivePath::new(year, flavour))
        }
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn year(y: &str) -> Option<ArchivePath> {
        Some(ArchivePath::new(y, None))
    }

    #[test]
    fn test_parse_path_info() {
        for (input, wanted) in vec![
            ("", None),
            ("/", None),
            ("//", None),
            ("/2003", year("2003")),
            ("2003", year("2003")),
            ("/2003/", year("2003")),
            ("/2003/index", year("2003")),
            ("/2003/index.flav", Some(ArchivePath::new("2003", Some("flav")))),
            ("/2003/index.tar.gz", Some(ArchivePath::new("2003", Some("tar.gz")))),
            ("/2003/indexes", year("2003")),
            ("/2003/index.", Some(ArchivePath::new("2003", Some("")))),
        ] {
            assert_eq!(parse_path_info(input), wanted, "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_path_info_rejects_bad_years() {
        for input in &["/abcd", "/20033", "/203", "/2o03", "/-200", "/２００３"] {
            assert_eq!(parse_path_info(input), None, "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_path_info_rejects_other_shapes() {
        for input in &[
            "/2003/07",
            "/2003/foo.html",
            "/2003/index/extra",
            "/2003/07/index.html",
        ] {
            assert_eq!(parse_path_info(input), None, "input: {:?}", input);
        }
    }
}
