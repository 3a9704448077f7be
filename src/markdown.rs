use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Converts a markdown entry body to HTML, appending the result to `out`.
pub fn to_html(out: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    html::push_html(out, Parser::new_ext(markdown, options).map(demote_headings));
}

// Entry headings sit below both the blog title (h1) and the entry title
// (h3 in the stock templates), so `#` becomes h3.
fn demote_headings(ev: Event) -> Event {
    match ev {
        Event::Start(Tag::Heading(level)) => Event::Start(Tag::Heading(demote(level))),
        Event::End(Tag::Heading(level)) => Event::End(Tag::Heading(demote(level))),
        _ => ev,
    }
}

fn demote(level: u32) -> u32 {
    std::cmp::min(level + 2, 6)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html_demotes_headings() {
        let mut out = String::new();
        to_html(&mut out, "# Title\n\n##### Deep\n\nSome ~~old~~ text.\n");
        assert_eq!(
            out,
            "<h3>Title</h3>\n<h6>Deep</h6>\n<p>Some <del>old</del> text.</p>\n"
        );
    }
}
