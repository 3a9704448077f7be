//! Defines [`SummaryEntry`], the synthetic entry that presents one month of
//! a year archive page.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// The template summary entries are rendered with.
pub const TEMPLATE_NAME: &str = "yearsummarystory";

/// A month of a year archive, presented as an entry so the host can render
/// it like any other.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryEntry {
    /// `<year-month>::summary`
    pub id: String,

    /// The `YYYY-MM` key.
    pub title: String,

    /// The `YYYY-MM` key.
    pub file_path: String,

    pub template_name: &'static str,

    /// Summaries never take comments.
    pub nocomments: bool,

    /// Midnight on the first of the month.
    pub timestamp: NaiveDateTime,

    /// Pre-rendered HTML.
    pub body: String,
}

impl SummaryEntry {
    /// Creates the summary for `year_month` (`YYYY-MM`). Fails if the key
    /// doesn't parse, which means the grouping produced a malformed key.
    pub fn new(year_month: &str, body: String) -> Result<SummaryEntry, FormatError> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", year_month), "%Y-%m-%d")
            .map_err(|err| FormatError {
                input: year_month.to_owned(),
                err,
            })?;

        Ok(SummaryEntry {
            id: format!("{}::summary", year_month),
            title: year_month.to_owned(),
            file_path: year_month.to_owned(),
            template_name: TEMPLATE_NAME,
            nocomments: true,
            timestamp: date.and_time(NaiveTime::default()),
            body,
        })
    }
}

/// Returned when a year-month key isn't `YYYY-MM`.
#[derive(Debug)]
pub struct FormatError {
    pub input: String,
    pub err: chrono::ParseError,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid year-month '{}': {}", self.input, self.err)
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new() -> Result<(), FormatError> {
        let entry = SummaryEntry::new("2004-07", "body".to_owned())?;
        assert_eq!(entry.id, "2004-07::summary");
        assert_eq!(entry.title, "2004-07");
        assert_eq!(entry.file_path, "2004-07");
        assert_eq!(entry.template_name, "yearsummarystory");
        assert!(entry.nocomments);
        assert_eq!(entry.body, "body");
        assert_eq!(
            entry.timestamp,
            NaiveDate::from_ymd_opt(2004, 7, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_new_rejects_malformed_keys() {
        for input in &["not-a-date", "2004-13", "2004", "2004-07-02", ""] {
            match SummaryEntry::new(input, String::new()) {
                Err(err) => assert_eq!(err.input, *input),
                Ok(entry) => panic!("'{}' parsed as {:?}", input, entry),
            }
        }
    }
}
