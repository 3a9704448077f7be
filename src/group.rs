//! Groups a year's [`Item`]s into month blocks of day rows.

use crate::archive::Item;

/// A month's worth of day rows, ready to become the body of a
/// [`crate::summary::SummaryEntry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGroup {
    /// `YYYY-MM`
    pub year_month: String,

    /// The month's day rows joined by newlines.
    pub body: String,
}

/// Renders one day's table row from its `YYYY-MM-DD` key and the link lines
/// of the items filed under it.
fn day_row(year_month_day: &str, lines: &[String]) -> String {
    format!(
        "<tr>\n<td valign=\"top\" align=\"left\">{}</td>\n<td>{}</td></tr>\n",
        year_month_day,
        lines.join("\n")
    )
}

/// Sorts `items` most-recent first, by the full [`Item`] ordering. The sort
/// is stable, so equal items keep their input order.
pub fn sort_descending(items: &mut [&Item]) {
    items.sort_by(|a, b| b.cmp(a));
}

/// Selects the items filed under `year`, sorts them most-recent first, and
/// groups contiguous runs by month and, within each month, by day. `line`
/// renders the link line for a single item; its first error aborts the
/// grouping.
///
/// Returns the months most-recent first. A year without items yields an
/// empty list.
pub fn group<F, E>(items: &[Item], year: &str, mut line: F) -> Result<Vec<MonthGroup>, E>
where
    F: FnMut(&Item) -> Result<String, E>,
{
    let mut selected: Vec<&Item> = items
        .iter()
        .filter(|item| item.year_month.starts_with(year))
        .collect();
    sort_descending(&mut selected);

    let mut months = Vec::new();
    let mut rows: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<(&str, &str)> = None;

    for item in selected {
        if let Some((month, day)) = current {
            if month != item.year_month {
                rows.push(day_row(day, &lines));
                lines.clear();
                months.push(MonthGroup {
                    year_month: month.to_owned(),
                    body: rows.join("\n"),
                });
                rows.clear();
            } else if day != item.year_month_day {
                rows.push(day_row(day, &lines));
                lines.clear();
            }
        }
        current = Some((&item.year_month, &item.year_month_day));
        lines.push(line(item)?);
    }

    if let Some((month, day)) = current {
        rows.push(day_row(day, &lines));
        months.push(MonthGroup {
            year_month: month.to_owned(),
            body: rows.join("\n"),
        });
    }

    Ok(months)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::archive::test::datetime;
    use std::convert::Infallible;
    use std::path::PathBuf;

    fn item(path: &str, ts: &str) -> Item {
        Item::new(PathBuf::from(path), datetime(ts))
    }

    fn path_line(item: &Item) -> Result<String, Infallible> {
        Ok(item.path.display().to_string())
    }

    fn items() -> Vec<Item> {
        vec![
            item("X/a.txt", "2004-07-01 10:00"),
            item("X/b.txt", "2004-07-02 09:00"),
            item("X/c.txt", "2004-08-15 08:00"),
            item("X/d.txt", "2003-12-31 23:00"),
            item("X/e.txt", "2004-07-02 18:00"),
        ]
    }

    #[test]
    fn test_group_orders_months_and_days_most_recent_first() {
        let months = group(&items(), "2004", path_line).unwrap();

        assert_eq!(
            months,
            vec![
                MonthGroup {
                    year_month: "2004-08".to_owned(),
                    body: day_row("2004-08-15", &["X/c.txt".to_owned()]),
                },
                MonthGroup {
                    year_month: "2004-07".to_owned(),
                    body: format!(
                        "{}\n{}",
                        day_row(
                            "2004-07-02",
                            &["X/e.txt".to_owned(), "X/b.txt".to_owned()]
                        ),
                        day_row("2004-07-01", &["X/a.txt".to_owned()]),
                    ),
                },
            ]
        );
    }

    #[test]
    fn test_day_row_markup() {
        assert_eq!(
            day_row("2004-07-02", &["one".to_owned(), "two".to_owned()]),
            "<tr>\n<td valign=\"top\" align=\"left\">2004-07-02</td>\n<td>one\ntwo</td></tr>\n"
        );
    }

    #[test]
    fn test_group_covers_each_item_of_the_year_once() {
        let items = items();
        let months = group(&items, "2004", path_line).unwrap();
        let joined: String = months.iter().map(|m| m.body.as_str()).collect();

        for item in &items {
            let path = item.path.display().to_string();
            let wanted = if item.year_month.starts_with("2004") { 1 } else { 0 };
            assert_eq!(joined.matches(&path).count(), wanted, "{}", path);
        }
    }

    #[test]
    fn test_group_empty_year() {
        assert!(group(&items(), "1999", path_line).unwrap().is_empty());
        assert!(group(&[], "2004", path_line).unwrap().is_empty());
    }

    #[test]
    fn test_group_is_deterministic() {
        let first = group(&items(), "2004", path_line).unwrap();
        let mut reversed = items();
        reversed.reverse();
        assert_eq!(first, group(&items(), "2004", path_line).unwrap());
        assert_eq!(first, group(&reversed, "2004", path_line).unwrap());
    }

    #[test]
    fn test_sort_ties_break_on_path() {
        let a = item("X/a.txt", "2004-07-02 09:00");
        let b = item("X/b.txt", "2004-07-02 09:00");
        let mut sorted = vec![&a, &b];
        sort_descending(&mut sorted);
        assert_eq!(sorted, vec![&b, &a]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_items() {
        let a = item("X/a.txt", "2004-07-02 09:00");
        let same = a.clone();
        let mut sorted = vec![&a, &same];
        sort_descending(&mut sorted);
        assert!(std::ptr::eq(sorted[0], &a));
        assert!(std::ptr::eq(sorted[1], &same));
    }

    #[test]
    fn test_group_stops_at_first_line_error() {
        let mut calls = 0;
        let result = group(&items(), "2004", |_| {
            calls += 1;
            Err::<String, &str>("unreadable")
        });
        assert_eq!(result, Err("unreadable"));
        assert_eq!(calls, 1);
    }
}
